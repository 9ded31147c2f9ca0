//! # adv-schema
//!
//! JSON Schema generation, validation, and verdict parsing for the adversary.
//!
//! Entity types are defined in `adv-core` with `#[derive(JsonSchema)]`.
//! This crate turns them into schemas, validates model output against them,
//! and exports the strict schema sent along with every completion request.

mod error;
mod registry;
mod verdict;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
pub use verdict::{RESPONSE_SCHEMA_NAME, response_format_schema};
