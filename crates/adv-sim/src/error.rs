//! Simulation error types.

use std::path::PathBuf;

use adv_config::ConfigError;
use adv_core::errors::CoreError;
use adv_llm::CompletionError;
use adv_store::StoreError;
use thiserror::Error;

/// Errors that abort a whole simulation run.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Required configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The input table could not be opened.
    #[error("failed to open input '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input table lacks one of the required columns.
    #[error("input is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    /// The input table is malformed.
    #[error("failed to read input: {0}")]
    Csv(#[from] csv::Error),

    /// The completion client could not be built.
    #[error("completion client: {0}")]
    Completion(#[from] CompletionError),

    /// The document store could not be built.
    #[error("document store: {0}")]
    Store(#[from] StoreError),
}

/// Why a single row failed. Logged and recorded, never propagated.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("id generation failed: {0}")]
    Id(#[from] CoreError),

    #[error("adversary call failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("storage write failed: {0}")]
    Store(#[from] StoreError),
}

impl RowError {
    /// Whether the adversary answered but outside the verdict schema.
    #[must_use]
    pub const fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::Completion(CompletionError::Schema(_)))
    }
}
