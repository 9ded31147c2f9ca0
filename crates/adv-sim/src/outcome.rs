//! Per-row outcomes and the batch summary.

use adv_core::enums::VerdictStatus;
use serde::Serialize;

/// Result of processing one input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RowOutcome {
    /// The verdict was stored under `verdict_id`.
    Written {
        case_id: String,
        verdict_id: String,
        status: VerdictStatus,
    },
    /// Nothing was stored for this row.
    Failed {
        case_id: String,
        statement: String,
        reason: String,
    },
}

impl RowOutcome {
    #[must_use]
    pub fn case_id(&self) -> &str {
        match self {
            Self::Written { case_id, .. } | Self::Failed { case_id, .. } => case_id,
        }
    }

    #[must_use]
    pub const fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Tally of a simulation run, with outcomes in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub written: usize,
    pub failed: usize,
    pub outcomes: Vec<RowOutcome>,
}

impl BatchSummary {
    pub(crate) fn record(&mut self, outcome: RowOutcome) {
        self.total += 1;
        if outcome.is_written() {
            self.written += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }

    /// Ids of every stored verdict, in input order.
    #[must_use]
    pub fn verdict_ids(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                RowOutcome::Written { verdict_id, .. } => Some(verdict_id.as_str()),
                RowOutcome::Failed { .. } => None,
            })
            .collect()
    }
}
