//! Entity types flowing through a simulation run.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{HardenerType, VerdictStatus};
use crate::history;

/// One row of the simulation input table.
///
/// Field names map to the column headers of the victory-condition sheet.
/// Columns not listed here are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CaseRecord {
    #[serde(rename = "ID")]
    pub case_id: String,
    #[serde(rename = "Full Victory Condition Statement")]
    pub statement: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Summary Title")]
    pub title: String,
}

impl CaseRecord {
    /// Column headers that must be present in the input table.
    pub const REQUIRED_COLUMNS: [&'static str; 4] = [
        "ID",
        "Full Victory Condition Statement",
        "Category",
        "Summary Title",
    ];

    /// Build the payload sent to the adversary for this case.
    #[must_use]
    pub fn payload(&self) -> TruthPayload {
        TruthPayload {
            truth_input: self.statement.clone(),
            truth_history: history::truth_history(&self.category),
        }
    }
}

/// The proposed truth plus the history it must be consistent with.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TruthPayload {
    pub truth_input: String,
    pub truth_history: Vec<String>,
}

/// The structured output of a single L ≡ T simulation step.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Verdict {
    /// Document identifier in the verdict store.
    pub id: String,
    /// The newly proposed truth taken from the input table.
    pub truth_input: String,
    /// All previously established truths the input was judged against.
    pub truth_history: Vec<String>,
    /// Whether the input was rejected or hardened.
    pub status: VerdictStatus,
    /// Reason for a contradiction, or the consequence text.
    pub detail: String,
    /// Classification of the consequence.
    pub hardener_type: HardenerType,
}

impl Verdict {
    /// Replace the model-assigned id and pin the input/history snapshot to
    /// exactly what was sent for evaluation.
    #[must_use]
    pub fn pinned(mut self, id: String, payload: &TruthPayload) -> Self {
        self.id = id;
        self.truth_input.clone_from(&payload.truth_input);
        self.truth_history.clone_from(&payload.truth_history);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn steel_case() -> CaseRecord {
        CaseRecord {
            case_id: "V007".into(),
            statement: "I cannot be harmed by steel.".into(),
            category: "Combat".into(),
            title: "Steel Immunity".into(),
        }
    }

    #[test]
    fn payload_carries_statement_and_history() {
        let payload = steel_case().payload();
        assert_eq!(payload.truth_input, "I cannot be harmed by steel.");
        assert_eq!(payload.truth_history.len(), history::HISTORY_LEN);
        assert_eq!(
            payload.truth_history[3],
            "The current game context is focused on the 'Combat' domain."
        );
    }

    #[test]
    fn payload_serializes_with_wire_keys() {
        let value = serde_json::to_value(steel_case().payload()).unwrap();
        assert!(value.get("truth_input").is_some());
        assert!(value["truth_history"].is_array());
    }

    #[test]
    fn pinned_overwrites_id_and_snapshot() {
        let payload = steel_case().payload();
        let from_model = Verdict {
            id: "model-chosen-uuid".into(),
            truth_input: "paraphrased".into(),
            truth_history: vec!["something else".into()],
            status: VerdictStatus::Consequence,
            detail: "Steel blades shatter on contact.".into(),
            hardener_type: HardenerType::Physical,
        };

        let pinned = from_model.pinned("V007-0a1b2c3d".into(), &payload);
        assert_eq!(pinned.id, "V007-0a1b2c3d");
        assert_eq!(pinned.truth_input, payload.truth_input);
        assert_eq!(pinned.truth_history, payload.truth_history);
        assert_eq!(pinned.detail, "Steel blades shatter on contact.");
        assert_eq!(pinned.hardener_type, HardenerType::Physical);
    }
}
