//! Error types for config synchronization.

use std::io;

use thiserror::Error;
use topo_graph::GraphError;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Failures that abort one dump's synchronization.
///
/// Neither kind is retried internally, and unrecognized config lines are
/// not errors at all — they are skipped in favor of forward compatibility
/// with unknown device syntax.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The dump's line source became unreadable mid-stream.
    #[error("failed to read device dump '{device}': {source}")]
    DumpRead {
        /// Device the dump belongs to.
        device: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// An insertion call to the discovery graph failed.
    #[error("graph registration failed: {0}")]
    Graph(#[from] GraphError),
}

impl SyncError {
    /// Creates a dump-read error.
    pub fn dump_read(device: impl Into<String>, source: io::Error) -> Self {
        Self::DumpRead {
            device: device.into(),
            source,
        }
    }
}
