//! Completion client error types.

use adv_schema::SchemaError;
use thiserror::Error;

/// Errors that can occur while asking the adversary for a verdict.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The HTTP client could not be constructed.
    #[error("client construction failed: {0}")]
    Client(String),

    /// HTTP transport error (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The deployment is throttling requests (HTTP 429). Not retried.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited {
        /// Milliseconds the service asked us to wait.
        retry_after_ms: u64,
    },

    /// The request payload could not be serialized.
    #[error("payload encoding failed: {0}")]
    Payload(#[from] serde_json::Error),

    /// The response carried no choices or an empty message.
    #[error("completion returned no content")]
    EmptyResponse,

    /// The model refused or the content filter stopped the answer.
    #[error("completion refused: {0}")]
    Refused(String),

    /// The answer did not match the verdict schema.
    #[error("verdict schema mismatch: {0}")]
    Schema(#[from] SchemaError),
}
