//! Outcome and classification enums carried by a verdict.
//!
//! Both enums serialize as `SCREAMING_SNAKE_CASE` literals, which is the exact
//! vocabulary the adversary model is instructed to answer with.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// VerdictStatus
// ---------------------------------------------------------------------------

/// Outcome of evaluating a proposed truth against the history.
///
/// `Contradiction` means the input breaks a core principle or the history;
/// `Consequence` means it was consistent and a binding consequence applies.
// No variant docs: the generated schema must stay a plain string `enum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictStatus {
    Contradiction,
    Consequence,
}

impl VerdictStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contradiction => "CONTRADICTION",
            Self::Consequence => "CONSEQUENCE",
        }
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HardenerType
// ---------------------------------------------------------------------------

/// Classification of the consequence that hardens a truth into reality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HardenerType {
    Physical,
    Temporal,
    Social,
    Other,
}

impl HardenerType {
    pub const ALL: [Self; 4] = [Self::Physical, Self::Temporal, Self::Social, Self::Other];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Physical => "PHYSICAL",
            Self::Temporal => "TEMPORAL",
            Self::Social => "SOCIAL",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for HardenerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
