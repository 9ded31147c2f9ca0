//! Cross-cutting error types for the adversary.
//!
//! Domain-specific errors (`CompletionError`, `StoreError`, ...) live in their
//! respective crates. Everything converges in the `adversary` binary.

use thiserror::Error;

/// Errors that can be raised by any adversary crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The OS random source could not produce bytes for an identifier.
    #[error("Entropy unavailable: {0}")]
    Entropy(String),
}
