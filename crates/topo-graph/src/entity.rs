//! Graph entity types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity the graph server assigns to an entity on insertion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A node in the discovery graph.
///
/// Attributes are free-form string pairs. The conventional keys for a
/// routing device are `router`, `type`, `name`, and `icon`; nothing in the
/// graph enforces them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Server-assigned identity; `None` until inserted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Attribute map describing the node.
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl Endpoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one attribute, builder style.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Looks up an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Server-assigned id, if this endpoint has been inserted.
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_attr_and_lookup() {
        let endpoint = Endpoint::new()
            .with_attr("router", "true")
            .with_attr("name", "core-1");
        assert_eq!(endpoint.attr("router"), Some("true"));
        assert_eq!(endpoint.attr("name"), Some("core-1"));
        assert_eq!(endpoint.attr("missing"), None);
        assert_eq!(endpoint.id(), None);
    }

    #[test]
    fn test_wire_shape() {
        let endpoint = Endpoint::new().with_attr("type", "brocade");
        let value = serde_json::to_value(&endpoint).unwrap();
        // Uninserted endpoints serialize without an id field at all.
        assert_eq!(value, serde_json::json!({"data": {"type": "brocade"}}));

        let inserted: Endpoint =
            serde_json::from_value(serde_json::json!({"id": 7, "data": {}})).unwrap();
        assert_eq!(inserted.id(), Some(EntityId(7)));
    }
}
