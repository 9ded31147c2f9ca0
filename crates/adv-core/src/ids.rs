//! Verdict identifier generation.
//!
//! Verdict ids are `{case_id}-{8 hex chars}`. The random suffix keeps ids
//! unique within a run even when the input table repeats a case id.

use crate::errors::CoreError;

/// Number of random bytes in the suffix (rendered as twice as many hex chars).
const SUFFIX_BYTES: usize = 4;

/// Generate a fresh verdict id for `case_id`, e.g. `"V007-a3f8b2c1"`.
///
/// # Errors
///
/// Returns [`CoreError::Entropy`] if the OS random source fails.
pub fn verdict_id(case_id: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; SUFFIX_BYTES];
    getrandom::fill(&mut bytes).map_err(|e| CoreError::Entropy(e.to_string()))?;
    let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{case_id}-{suffix}"))
}
