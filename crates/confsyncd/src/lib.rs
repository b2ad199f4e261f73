//! Router config synchronization daemon.
//!
//! `confsyncd` ingests exported text configuration dumps from routing
//! devices and registers what it finds in the discovery graph: one endpoint
//! per device, one attached interface per record the parser finalizes.
//!
//! Pipeline: raw dump lines → [`brocade::ConfigParser`] →
//! [`registrar::InterfaceRegistrar`] → [`topo_graph::GraphClient`].
//! Distinct dumps are independent and run on separate workers; within one
//! dump lines are processed strictly in order, because a later `router-id`
//! directive finalizes the record accumulated before it.

pub mod brocade;
pub mod config;
pub mod error;
pub mod registrar;
pub mod router_sync;
pub mod types;

pub use error::{SyncError, SyncResult};
pub use router_sync::{RouterSync, SyncSummary};
pub use types::InterfaceRecord;

#[cfg(test)]
pub(crate) mod testing;
