//! # adv-config
//!
//! Layered configuration loading for the adversary using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Azure deployment settings (`AZURE_OPENAI_ENDPOINT`, `COSMOS_KEY`, ...)
//! 2. Environment variables (`ADVERSARY_*` prefix, `__` as separator)
//! 3. Project-level `adversary.toml`
//! 4. User-level `~/.config/adversary/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ADVERSARY_OPENAI__ENDPOINT` -> `openai.endpoint`,
//! `ADVERSARY_COSMOS__CONTAINER_ID` -> `cosmos.container_id`, etc. The flat
//! Azure names in [`AZURE_SETTINGS`] map onto the same keys and are read as plain strings.
//!
//! # Usage
//!
//! ```no_run
//! use adv_config::AdversaryConfig;
//!
//! let config = AdversaryConfig::load_required().expect("config");
//! println!("deployment: {}", config.openai.deployment);
//! ```

mod cosmos;
mod error;
mod openai;
mod simulation;

pub use cosmos::CosmosConfig;
pub use error::ConfigError;
pub use openai::{OpenAiConfig, ResponseFormatMode};
pub use simulation::SimulationConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Flat Azure setting names and the config keys they populate.
///
/// Order matters: [`AdversaryConfig::validate`] reports the first missing one.
pub const AZURE_SETTINGS: [(&str, &str); 7] = [
    ("AZURE_OPENAI_ENDPOINT", "openai.endpoint"),
    ("AZURE_OPENAI_KEY", "openai.api_key"),
    ("AZURE_OPENAI_DEPLOYMENT", "openai.deployment"),
    ("COSMOS_ENDPOINT", "cosmos.endpoint"),
    ("COSMOS_KEY", "cosmos.key"),
    ("COSMOS_DATABASE_ID", "cosmos.database_id"),
    ("COSMOS_CONTAINER_ID", "cosmos.container_id"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdversaryConfig {
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub cosmos: CosmosConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl AdversaryConfig {
    /// Load configuration from all sources without checking required settings.
    ///
    /// Does NOT read `.env`; the binary does that before loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration and fail on the first missing required setting.
    pub fn load_required() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from("adversary.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Prefixed environment variables
        figment = figment.merge(Env::prefixed("ADVERSARY_").split("__"));

        // Layer 4: Azure deployment settings (highest priority)
        Self::azure_env().fold(figment, |figment, setting| figment.merge(setting))
    }

    /// Providers for the flat Azure setting names.
    ///
    /// Values are taken verbatim as strings: `COSMOS_DATABASE_ID=2024` is the
    /// id `"2024"`, not an integer.
    fn azure_env() -> impl Iterator<Item = Serialized<String>> {
        AZURE_SETTINGS.iter().filter_map(|(name, path)| {
            std::env::var(name)
                .ok()
                .map(|value| Serialized::default(path, value))
        })
    }

    /// Check every required setting, returning the first one that is empty.
    ///
    /// The deployment name has a default and is never reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("AZURE_OPENAI_ENDPOINT", &self.openai.endpoint),
            ("AZURE_OPENAI_KEY", &self.openai.api_key),
            ("COSMOS_ENDPOINT", &self.cosmos.endpoint),
            ("COSMOS_KEY", &self.cosmos.key),
            ("COSMOS_DATABASE_ID", &self.cosmos.database_id),
            ("COSMOS_CONTAINER_ID", &self.cosmos.container_id),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((setting, _)) => Err(ConfigError::Missing { setting: *setting }),
            None => Ok(()),
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("adversary").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AdversaryConfig {
        AdversaryConfig {
            openai: OpenAiConfig {
                endpoint: "https://res.openai.azure.com".into(),
                api_key: "oai-key".into(),
                ..Default::default()
            },
            cosmos: CosmosConfig {
                endpoint: "https://acct.documents.azure.com:443/".into(),
                key: "c2VjcmV0LWtleQ==".into(),
                database_id: "lt-game".into(),
                container_id: "verdicts".into(),
                ..Default::default()
            },
            simulation: SimulationConfig::default(),
        }
    }

    #[test]
    fn default_config_is_incomplete() {
        let config = AdversaryConfig::default();
        assert!(!config.openai.is_configured());
        assert!(!config.cosmos.is_configured());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing {
                setting: "AZURE_OPENAI_ENDPOINT"
            })
        ));
    }

    #[test]
    fn complete_config_validates() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let mut config = configured();
        config.cosmos.database_id = "   ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing {
                setting: "COSMOS_DATABASE_ID"
            })
        ));
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: AdversaryConfig = AdversaryConfig::figment().extract()?;
            assert_eq!(config.openai.deployment, "gpt4-logic");
            assert_eq!(config.simulation.input_path, "victory.csv");
            Ok(())
        });
    }
}
