//! # adv-sim
//!
//! The L ≡ T mass simulation.
//!
//! Reads victory-condition cases from a CSV table and, one row at a time in
//! file order:
//! 1. Seeds the truth history (three lore truths + the case's category)
//! 2. Asks the adversary for a verdict on the case's statement
//! 3. Replaces the verdict id with `{case_id}-{random hex}`
//! 4. Upserts the verdict into the document store
//!
//! A failing row is logged and recorded in the [`BatchSummary`]; it never
//! stops the rows after it. Only problems outside the row loop (unreadable
//! input, missing columns, client construction, configuration) abort a run.

mod batch;
mod error;
pub mod input;
mod outcome;

pub use batch::{run_batch, run_with_config, simulate_case};
pub use error::{RowError, SimulationError};
pub use outcome::{BatchSummary, RowOutcome};
