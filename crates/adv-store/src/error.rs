//! Storage error types.

use thiserror::Error;

/// Errors from verdict storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The master key is not valid base64.
    #[error("invalid master key: {0}")]
    InvalidKey(String),

    /// The HTTP client could not be constructed.
    #[error("client construction failed: {0}")]
    Client(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Cosmos DB returned a non-success status code.
    #[error("Cosmos DB error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// Request rate too large (HTTP 429).
    #[error("throttled, retry after {retry_after_ms}ms")]
    Throttled {
        /// Milliseconds the service asked us to wait.
        retry_after_ms: u64,
    },

    /// The document has no usable value at the container's partition key path.
    #[error("partition key '{path}' not found in document")]
    PartitionKey { path: String },

    /// The document could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
