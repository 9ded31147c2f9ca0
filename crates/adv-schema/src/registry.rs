//! Central schema registry for the adversary types.
//!
//! The `SchemaRegistry` builds JSON Schemas from adv-core types at construction
//! time using [`schemars::schema_for!`] and compiles a `jsonschema` validator
//! for each one, so a batch validates every row against the same validator.

use std::collections::HashMap;

use jsonschema::Validator;
use schemars::schema_for;

use crate::error::SchemaError;

/// Central store of all JSON Schemas in the adversary.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, Entry>,
}

struct Entry {
    schema: serde_json::Value,
    validator: Validator,
}

/// Insert a schema and its compiled validator into the map. Panics if the
/// `schemars` output cannot be converted or compiled (not expected for a
/// derived schema).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        let schema = serde_json::to_value(schema_for!($ty)).unwrap();
        let validator = jsonschema::validator_for(&schema).unwrap();
        $map.insert($name, Entry { schema, validator });
    };
}

impl SchemaRegistry {
    /// Build a new registry containing the case, payload and verdict schemas.
    ///
    /// # Panics
    ///
    /// Panics if a `schemars`-generated schema fails to serialize or to
    /// compile. Neither is expected for the derived entity schemas.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        register!(schemas, "case_record", adv_core::entities::CaseRecord);
        register!(schemas, "truth_payload", adv_core::entities::TruthPayload);
        register!(schemas, "verdict", adv_core::entities::Verdict);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name).map(|entry| &entry.schema)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let entry = self
            .schemas
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let errors: Vec<String> = entry
            .validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
