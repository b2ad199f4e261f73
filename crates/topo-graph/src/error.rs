//! Error types for graph operations.

use thiserror::Error;

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors surfaced by graph client operations.
///
/// None of these are retried by the client; a failed insertion aborts the
/// dump that issued it.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Transport-level failure talking to the graph server.
    #[error("graph transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The graph server rejected the request.
    #[error("graph server returned status {status} for {operation}")]
    Status {
        /// The operation that failed (e.g., "insert endpoints").
        operation: &'static str,
        /// HTTP status code.
        status: u16,
    },

    /// The server's insertion response carried no assigned identity.
    #[error("graph server response missing id for inserted endpoint")]
    MissingId,

    /// The configured graph server URL is unusable.
    #[error("invalid graph server url '{0}'")]
    InvalidUrl(String),
}

impl GraphError {
    /// Creates a status error.
    pub fn status(operation: &'static str, status: u16) -> Self {
        Self::Status { operation, status }
    }
}
