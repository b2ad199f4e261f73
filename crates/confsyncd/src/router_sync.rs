//! Per-dump synchronization driver.

use std::io::BufRead;

use topo_graph::{Endpoint, GraphClient, GraphError};
use topo_log::{debug, info, Logger};

use crate::brocade::{ConfigParser, VENDOR};
use crate::error::{SyncError, SyncResult};
use crate::registrar::{EndpointHandle, InterfaceRegistrar};

/// Outcome of syncing one device dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    /// Device name the dump was registered under.
    pub device: String,
    /// Interface records flushed to the registrar, trailing flush included.
    pub interfaces: usize,
    /// Whether the dump ran against a real endpoint.
    pub live: bool,
}

/// Drives config dumps into the discovery graph.
///
/// Each dump gets exactly one endpoint registration (or the dry-run
/// placeholder) before any line is parsed, then one interface insertion
/// per flushed record, in line order. The first read or registration
/// failure aborts the dump and discards whatever was still accumulating.
pub struct RouterSync<'a> {
    client: &'a dyn GraphClient,
    dry_run: bool,
    logger: Logger,
}

impl<'a> RouterSync<'a> {
    pub fn new(client: &'a dyn GraphClient, dry_run: bool, logger: Logger) -> Self {
        Self {
            client,
            dry_run,
            logger,
        }
    }

    /// Builds the device endpoint entity registered for a dump.
    fn device_endpoint(device: &str) -> Endpoint {
        Endpoint::new()
            .with_attr("router", "true")
            .with_attr("type", VENDOR)
            .with_attr("name", device)
            .with_attr("icon", "router")
    }

    /// Registers `device` and syncs every interface record found in the
    /// dump.
    pub async fn sync_dump(&self, device: &str, reader: impl BufRead) -> SyncResult<SyncSummary> {
        let endpoint = if self.dry_run {
            EndpointHandle::DryRun
        } else {
            let inserted = self
                .client
                .insert_endpoints(&[Self::device_endpoint(device)])
                .await?;
            let id = inserted
                .first()
                .and_then(Endpoint::id)
                .ok_or(GraphError::MissingId)?;
            debug!(self.logger, "registered endpoint {} for {}", id, device);
            EndpointHandle::Live(id)
        };

        let mut registrar = InterfaceRegistrar::new(self.client, endpoint, self.logger.clone());
        let mut parser = ConfigParser::new(self.logger.clone());

        for line in reader.lines() {
            let line = line.map_err(|source| SyncError::dump_read(device, source))?;
            if let Some(record) = parser.feed(&line) {
                registrar.register(&record).await?;
            }
        }
        registrar.register(&parser.finish()).await?;

        let summary = SyncSummary {
            device: device.to_string(),
            interfaces: registrar.flushed(),
            live: endpoint.is_live(),
        };
        info!(
            self.logger,
            "synced {}: {} interface record(s)", summary.device, summary.interfaces
        );
        Ok(summary)
    }
}
