//! Trigger outcome → HTTP status and plain-text body.

use std::future::Future;

use adv_config::{AdversaryConfig, ConfigError};
use adv_sim::{BatchSummary, SimulationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerResponse {
    pub status: u16,
    pub body: String,
}

impl TriggerResponse {
    fn completed(summary: &BatchSummary) -> Self {
        Self {
            status: 200,
            body: format!(
                "L ≡ T Mass Simulation Started and Completed Successfully. Data is in Cosmos DB. \
                 Check logs for batch status. Processed {} cases: {} written, {} failed.",
                summary.total, summary.written, summary.failed
            ),
        }
    }

    fn misconfigured(error: &ConfigError) -> Self {
        Self {
            status: 500,
            body: format!(
                "Deployment FAILED due to missing environment variable. \
                 Check Application Settings. Error: {error}"
            ),
        }
    }

    fn failed(error: &SimulationError) -> Self {
        Self {
            status: 500,
            body: format!("Simulation failed during execution. Check logs. Error: {error}"),
        }
    }
}

/// Run one simulation for a trigger request.
///
/// `run` is only invoked when configuration loaded.
pub async fn handle<'a, F, Fut>(
    config: &'a Result<AdversaryConfig, ConfigError>,
    run: F,
) -> TriggerResponse
where
    F: FnOnce(&'a AdversaryConfig) -> Fut,
    Fut: Future<Output = Result<BatchSummary, SimulationError>>,
{
    let config = match config {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "trigger rejected: configuration failed to load");
            return TriggerResponse::misconfigured(error);
        }
    };

    match run(config).await {
        Ok(summary) => TriggerResponse::completed(&summary),
        Err(SimulationError::Config(error)) => {
            tracing::error!(%error, "trigger rejected: configuration incomplete");
            TriggerResponse::misconfigured(&error)
        }
        Err(error) => {
            tracing::error!(%error, "simulation failed");
            TriggerResponse::failed(&error)
        }
    }
}
