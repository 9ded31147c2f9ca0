//! The sequential simulation loop.

use std::path::Path;

use adv_config::AdversaryConfig;
use adv_core::entities::{CaseRecord, Verdict};
use adv_core::ids;
use adv_llm::{AzureOpenAiClient, CompletionClient};
use adv_store::{CosmosStore, DocumentStore};

use crate::error::{RowError, SimulationError};
use crate::input;
use crate::outcome::{BatchSummary, RowOutcome};

/// Run one case end to end: evaluate, re-key, upsert.
///
/// Returns the verdict exactly as it was stored.
///
/// # Errors
///
/// Returns a [`RowError`] if any step fails. Nothing is stored in that case.
pub async fn simulate_case<C, S>(
    case: &CaseRecord,
    completion: &C,
    store: &S,
) -> Result<Verdict, RowError>
where
    C: CompletionClient,
    S: DocumentStore,
{
    let payload = case.payload();
    let verdict = completion.evaluate(&payload).await?;
    let verdict = verdict.pinned(ids::verdict_id(&case.case_id)?, &payload);
    store.upsert(&verdict).await?;
    Ok(verdict)
}

/// Simulate every case in the table at `input`, one at a time in file order.
///
/// Row failures are logged and recorded in the summary; they never abort
/// the run.
///
/// # Errors
///
/// Returns [`SimulationError`] only if the table cannot be loaded.
pub async fn run_batch<C, S>(
    input: &Path,
    completion: &C,
    store: &S,
) -> Result<BatchSummary, SimulationError>
where
    C: CompletionClient,
    S: DocumentStore,
{
    let cases = input::read_cases(input)?;
    tracing::info!(
        input = %input.display(),
        cases = cases.len(),
        "starting L ≡ T mass simulation"
    );

    let mut summary = BatchSummary::default();
    for case in &cases {
        let outcome = match simulate_case(case, completion, store).await {
            Ok(verdict) => {
                tracing::info!(
                    case_id = %case.case_id,
                    title = %case.title,
                    verdict_id = %verdict.id,
                    status = %verdict.status,
                    "case processed"
                );
                RowOutcome::Written {
                    case_id: case.case_id.clone(),
                    verdict_id: verdict.id,
                    status: verdict.status,
                }
            }
            Err(error) => {
                tracing::error!(
                    case_id = %case.case_id,
                    statement = %case.statement,
                    schema_mismatch = error.is_schema_mismatch(),
                    %error,
                    "case failed"
                );
                RowOutcome::Failed {
                    case_id: case.case_id.clone(),
                    statement: case.statement.clone(),
                    reason: error.to_string(),
                }
            }
        };
        summary.record(outcome);
    }

    tracing::info!(
        total = summary.total,
        written = summary.written,
        failed = summary.failed,
        "simulation complete"
    );
    Ok(summary)
}

/// Validate `config`, build the Azure OpenAI and Cosmos clients, and run the
/// table at `config.simulation.input_path`.
///
/// # Errors
///
/// Returns [`SimulationError::Config`] for a missing setting (before the
/// input is opened), a client construction error, or a table load error.
pub async fn run_with_config(config: &AdversaryConfig) -> Result<BatchSummary, SimulationError> {
    config.validate()?;
    let store = CosmosStore::new(&config.cosmos)?;
    let completion = AzureOpenAiClient::new(&config.openai)?;
    tracing::debug!(
        completions = completion.url(),
        documents = store.docs_url(),
        "clients ready"
    );
    run_batch(Path::new(&config.simulation.input_path), &completion, &store).await
}
