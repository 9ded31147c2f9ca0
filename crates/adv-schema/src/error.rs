//! Schema validation error types.

use thiserror::Error;

/// Errors from the schema registry and verdict parsing.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// The model output was not a JSON document.
    #[error("Malformed JSON: {0}")]
    Malformed(String),

    /// JSON value did not pass schema validation.
    #[error("Validation failed: {errors:?}")]
    ValidationFailed {
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },
}
