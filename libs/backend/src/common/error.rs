pub use reconcile::BoxError;

/// Unified error type for backend connection operations
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Connection could not be established or verified within the retry budget.
    ///
    /// `source` is `None` when the transport handed back a handle that did
    /// not report itself as connected.
    #[error("failed to connect to NATS at {url}")]
    Connect {
        url: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Liveness query on an existing handle returned false
    #[error("NATS connection is not connected")]
    NotConnected,
}

impl BackendError {
    /// Whether this is the connection failure kind returned by `Builder::build`
    pub fn is_connect(&self) -> bool {
        matches!(self, BackendError::Connect { .. })
    }
}

/// Result type alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
