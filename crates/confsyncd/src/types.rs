//! Core types for config synchronization.

/// Attributes accumulated for one interface between two flush boundaries.
///
/// Fields the dump never set stay empty; downstream consumers treat empty
/// as absent, so the record is registered as-is even when nothing was
/// accumulated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceRecord {
    /// Human-readable port description (`port-name` directive).
    pub description: String,
    /// IPv4 address in CIDR form, or the `/32` pseudo-address of a
    /// router-id record.
    pub ipv4: String,
    /// IPv6 address. Link-local addresses are never stored.
    pub ipv6: String,
}

impl InterfaceRecord {
    /// True when no directive has populated any field.
    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.ipv4.is_empty() && self.ipv6.is_empty()
    }
}
