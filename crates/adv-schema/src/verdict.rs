//! Verdict parsing and the strict response schema.

use adv_core::entities::Verdict;
use schemars::schema_for;
use serde_json::{Map, Value};

use crate::SchemaRegistry;
use crate::error::SchemaError;

/// Name attached to the schema in `response_format.json_schema.name`.
pub const RESPONSE_SCHEMA_NAME: &str = "adversary_verdict";

impl SchemaRegistry {
    /// Parse raw model output into a [`Verdict`].
    ///
    /// The text is decoded as JSON (a surrounding Markdown code fence is
    /// tolerated), validated against the `verdict` schema, then decoded into
    /// the typed struct. Out-of-vocabulary `status` or `hardener_type` values
    /// fail at the validation step.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Malformed` for non-JSON text and
    /// `SchemaError::ValidationFailed` when the document does not match.
    pub fn parse_verdict(&self, raw: &str) -> Result<Verdict, SchemaError> {
        let value: serde_json::Value = serde_json::from_str(strip_code_fence(raw))
            .map_err(|e| SchemaError::Malformed(e.to_string()))?;

        self.validate("verdict", &value)?;

        serde_json::from_value(value).map_err(|e| SchemaError::ValidationFailed {
            errors: vec![e.to_string()],
        })
    }
}

/// The verdict schema in the shape structured outputs accept.
///
/// Strict mode rejects unknown top-level keywords, requires
/// `additionalProperties: false` on every object, and does not allow a
/// `$ref` next to other keywords. Field docs put a `description` beside the
/// enum references, so those references are inlined from `$defs`.
///
/// # Panics
///
/// Panics if `serde_json::to_value` fails on the `schemars` output, which is
/// not expected for a derived schema.
#[must_use]
pub fn response_format_schema() -> serde_json::Value {
    let mut schema = serde_json::to_value(schema_for!(Verdict)).unwrap();
    let Some(object) = schema.as_object_mut() else {
        return schema;
    };

    object.remove("$schema");
    object.insert("additionalProperties".into(), Value::Bool(false));

    let defs = object
        .get("$defs")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    if let Some(properties) = object.get_mut("properties") {
        inline_sibling_refs(properties, &defs);
    }
    if !contains_ref(&schema)
        && let Some(object) = schema.as_object_mut()
    {
        object.remove("$defs");
    }
    schema
}

/// Replace every `$ref` that has sibling keywords with the referenced
/// definition, keeping the siblings.
fn inline_sibling_refs(node: &mut Value, defs: &Map<String, Value>) {
    match node {
        Value::Object(map) => {
            let definition = map
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|target| target.strip_prefix("#/$defs/"))
                .and_then(|name| defs.get(name))
                .and_then(Value::as_object);
            if map.len() > 1
                && let Some(definition) = definition.cloned()
            {
                map.remove("$ref");
                for (key, value) in definition {
                    map.entry(key).or_insert(value);
                }
            }
            map.values_mut()
                .for_each(|child| inline_sibling_refs(child, defs));
        }
        Value::Array(items) => items
            .iter_mut()
            .for_each(|child| inline_sibling_refs(child, defs)),
        _ => {}
    }
}

fn contains_ref(node: &Value) -> bool {
    match node {
        Value::Object(map) => map
            .iter()
            .any(|(key, value)| key == "$ref" || contains_ref(value)),
        Value::Array(items) => items.iter().any(contains_ref),
        _ => false,
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use adv_core::enums::{HardenerType, VerdictStatus};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const VALID: &str = r#"{
        "id": "3f2b9a4e-model",
        "truth_input": "I cannot be harmed by steel.",
        "truth_history": ["The world is governed by the principle that Logic is Truth (L ≡ T)."],
        "status": "CONSEQUENCE",
        "detail": "Every steel weapon within reach rusts to dust.",
        "hardener_type": "PHYSICAL"
    }"#;

    #[test]
    fn parses_valid_verdict() {
        let verdict = SchemaRegistry::new().parse_verdict(VALID).unwrap();
        assert_eq!(verdict.status, VerdictStatus::Consequence);
        assert_eq!(verdict.hardener_type, HardenerType::Physical);
        assert_eq!(verdict.truth_input, "I cannot be harmed by steel.");
    }

    #[test]
    fn tolerates_markdown_fence() {
        let fenced = format!("```json\n{VALID}\n```");
        assert!(SchemaRegistry::new().parse_verdict(&fenced).is_ok());
    }

    #[rstest]
    #[case("status", "UNDECIDED")]
    #[case("status", "consequence")]
    #[case("hardener_type", "MAGICAL")]
    #[case("hardener_type", "physical")]
    fn rejects_out_of_vocabulary_tags(#[case] field: &str, #[case] value: &str) {
        let mut doc: serde_json::Value = serde_json::from_str(VALID).unwrap();
        doc[field] = serde_json::Value::String(value.into());

        let err = SchemaRegistry::new()
            .parse_verdict(&doc.to_string())
            .unwrap_err();
        assert!(matches!(err, SchemaError::ValidationFailed { .. }), "{err}");
    }

    #[test]
    fn rejects_non_json() {
        let err = SchemaRegistry::new()
            .parse_verdict("The truth is consistent.")
            .unwrap_err();
        assert!(matches!(err, SchemaError::Malformed(_)));
    }

    #[test]
    fn response_schema_is_strict() {
        let schema = response_format_schema();
        assert!(schema.get("$schema").is_none());
        assert_eq!(schema["additionalProperties"], serde_json::json!(false));

        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        for field in ["id", "truth_input", "truth_history", "status", "detail", "hardener_type"] {
            assert!(required.contains(&field), "{field} should be required");
        }
    }

    fn refs_with_siblings(node: &Value, path: &str, found: &mut Vec<String>) {
        match node {
            Value::Object(map) => {
                if map.contains_key("$ref") && map.len() > 1 {
                    found.push(path.to_string());
                }
                for (key, child) in map {
                    refs_with_siblings(child, &format!("{path}/{key}"), found);
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    refs_with_siblings(child, &format!("{path}/{index}"), found);
                }
            }
            _ => {}
        }
    }

    #[test]
    fn response_schema_has_no_ref_beside_other_keywords() {
        let schema = response_format_schema();
        let mut found = Vec::new();
        refs_with_siblings(&schema, "", &mut found);
        assert!(found.is_empty(), "$ref with siblings at {found:?}");
    }

    #[test]
    fn response_schema_inlines_tag_enums() {
        let schema = response_format_schema();
        let properties = &schema["properties"];

        assert_eq!(
            properties["status"]["enum"],
            serde_json::json!(["CONTRADICTION", "CONSEQUENCE"])
        );
        assert_eq!(
            properties["hardener_type"]["enum"],
            serde_json::json!(["PHYSICAL", "TEMPORAL", "SOCIAL", "OTHER"])
        );
        assert_eq!(
            properties["status"]["description"],
            "Whether the input was rejected or hardened."
        );
        assert!(schema.get("$defs").is_none());
    }

    #[test]
    fn response_schema_still_judges_verdicts() {
        let validator = jsonschema::validator_for(&response_format_schema()).unwrap();
        let mut doc: Value = serde_json::from_str(VALID).unwrap();
        assert!(validator.is_valid(&doc));

        doc["status"] = Value::String("MAYBE".into());
        assert!(!validator.is_valid(&doc));
    }

    #[test]
    fn inlining_keeps_sibling_keywords() {
        let defs: Map<String, Value> = serde_json::from_value(serde_json::json!({
            "Tag": { "type": "string", "enum": ["A"], "description": "from def" }
        }))
        .unwrap();
        let mut node = serde_json::json!({
            "tag": { "$ref": "#/$defs/Tag", "description": "from field" },
            "plain": { "$ref": "#/$defs/Tag" }
        });

        inline_sibling_refs(&mut node, &defs);

        assert_eq!(
            node["tag"],
            serde_json::json!({ "type": "string", "enum": ["A"], "description": "from field" })
        );
        assert_eq!(node["plain"], serde_json::json!({ "$ref": "#/$defs/Tag" }));
    }

    #[test]
    fn strip_code_fence_leaves_plain_json() {
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }
}
