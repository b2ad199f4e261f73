//! Interface registration against the discovery graph.

use topo_graph::{EntityId, GraphClient};
use topo_log::{debug, Logger};

use crate::error::SyncResult;
use crate::types::InterfaceRecord;

/// The endpoint identity interface registrations attach to.
///
/// Dry runs never create a real endpoint; the placeholder keeps the flush
/// bookkeeping identical while suppressing every remote effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointHandle {
    /// Endpoint inserted into the graph, with its server-assigned id.
    Live(EntityId),
    /// Dry-run placeholder; registrations become no-op successes.
    DryRun,
}

impl EndpointHandle {
    /// True when registrations will reach the graph server.
    pub fn is_live(self) -> bool {
        matches!(self, EndpointHandle::Live(_))
    }
}

/// Issues one graph insertion per finalized interface record.
pub struct InterfaceRegistrar<'a> {
    client: &'a dyn GraphClient,
    endpoint: EndpointHandle,
    logger: Logger,
    flushed: usize,
}

impl<'a> InterfaceRegistrar<'a> {
    pub fn new(client: &'a dyn GraphClient, endpoint: EndpointHandle, logger: Logger) -> Self {
        Self {
            client,
            endpoint,
            logger,
            flushed: 0,
        }
    }

    /// Registers one finalized record against the dump's endpoint.
    ///
    /// Arguments are shaped the same way in both modes; only the remote
    /// call is suppressed for dry runs.
    pub async fn register(&mut self, record: &InterfaceRecord) -> SyncResult<()> {
        self.flushed += 1;
        let (description, ipv4, ipv6) = (
            record.description.as_str(),
            record.ipv4.as_str(),
            record.ipv6.as_str(),
        );

        match self.endpoint {
            EndpointHandle::Live(owner) => {
                self.client
                    .insert_interface(owner, description, ipv4, ipv6)
                    .await?;
            }
            EndpointHandle::DryRun => {
                debug!(
                    self.logger,
                    "dry run: skipping insert of ('{}', '{}', '{}')", description, ipv4, ipv6
                );
            }
        }
        Ok(())
    }

    /// Number of records flushed through this registrar.
    pub fn flushed(&self) -> usize {
        self.flushed
    }
}
