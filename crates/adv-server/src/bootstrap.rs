use adv_config::{AdversaryConfig, ConfigError, SimulationConfig};

/// Configuration as read once at process start.
///
/// Required settings are not checked here; a run validates before it touches
/// input or storage.
pub struct Startup {
    pub config: Result<AdversaryConfig, ConfigError>,
    fallback: SimulationConfig,
}

impl Startup {
    pub fn new(config: Result<AdversaryConfig, ConfigError>) -> Self {
        Self {
            config,
            fallback: SimulationConfig::default(),
        }
    }

    /// Simulation settings, or the defaults if configuration failed to load.
    pub fn simulation(&self) -> &SimulationConfig {
        self.config
            .as_ref()
            .map_or(&self.fallback, |config| &config.simulation)
    }
}

pub fn load() -> Startup {
    if let Err(error) = dotenvy::dotenv()
        && !error.not_found()
    {
        tracing::warn!(%error, "failed to read .env; continuing without it");
    }

    let config = AdversaryConfig::load();
    match &config {
        Ok(loaded) => {
            if let Err(error) = loaded.validate() {
                tracing::error!(%error, "configuration incomplete; simulations will fail");
            }
        }
        Err(error) => tracing::error!(%error, "failed to load configuration"),
    }
    Startup::new(config)
}
