//! Test doubles shared by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use topo_graph::{Endpoint, EntityId, GraphClient, GraphError, GraphResult};

/// Graph client double that records every call. Ids are assigned
/// sequentially from 100.
pub(crate) struct RecordingClient {
    endpoints: Mutex<Vec<Endpoint>>,
    interfaces: Mutex<Vec<(EntityId, String, String, String)>>,
    fail_interfaces: bool,
}

impl RecordingClient {
    pub(crate) fn new() -> Self {
        Self {
            endpoints: Mutex::new(Vec::new()),
            interfaces: Mutex::new(Vec::new()),
            fail_interfaces: false,
        }
    }

    /// Client whose interface insertions always fail.
    pub(crate) fn failing() -> Self {
        Self {
            fail_interfaces: true,
            ..Self::new()
        }
    }

    pub(crate) fn endpoints(&self) -> Vec<Endpoint> {
        self.endpoints.lock().unwrap().clone()
    }

    pub(crate) fn interfaces(&self) -> Vec<(EntityId, String, String, String)> {
        self.interfaces.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphClient for RecordingClient {
    async fn insert_endpoints(&self, endpoints: &[Endpoint]) -> GraphResult<Vec<Endpoint>> {
        let mut recorded = self.endpoints.lock().unwrap();
        let mut inserted = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            let mut endpoint = endpoint.clone();
            endpoint.id = Some(EntityId(100 + recorded.len() as i64));
            recorded.push(endpoint.clone());
            inserted.push(endpoint);
        }
        Ok(inserted)
    }

    async fn insert_interface(
        &self,
        owner: EntityId,
        description: &str,
        ipv4: &str,
        ipv6: &str,
    ) -> GraphResult<()> {
        if self.fail_interfaces {
            return Err(GraphError::status("insert interface", 500));
        }
        self.interfaces.lock().unwrap().push((
            owner,
            description.to_string(),
            ipv4.to_string(),
            ipv6.to_string(),
        ));
        Ok(())
    }
}
