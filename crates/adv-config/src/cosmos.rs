//! Azure Cosmos DB configuration.

use serde::{Deserialize, Serialize};

fn default_partition_key_path() -> String {
    String::from("/id")
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CosmosConfig {
    /// Account endpoint, e.g. `https://my-account.documents.azure.com:443/`.
    #[serde(default)]
    pub endpoint: String,

    /// Base64 master key.
    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub database_id: String,

    #[serde(default)]
    pub container_id: String,

    /// Partition key path of the container (e.g. `/id`, `/status`).
    #[serde(default = "default_partition_key_path")]
    pub partition_key_path: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CosmosConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            key: String::new(),
            database_id: String::new(),
            container_id: String::new(),
            partition_key_path: default_partition_key_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CosmosConfig {
    /// Check if the account, credential, database and container are all set.
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty()
            && !self.key.is_empty()
            && !self.database_id.is_empty()
            && !self.container_id.is_empty()
    }

    /// Resource link of the container, e.g. `dbs/game/colls/verdicts`.
    pub fn container_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database_id, self.container_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = CosmosConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.partition_key_path, "/id");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn container_link_joins_ids() {
        let config = CosmosConfig {
            database_id: "lt-game".into(),
            container_id: "verdicts".into(),
            ..Default::default()
        };
        assert_eq!(config.container_link(), "dbs/lt-game/colls/verdicts");
    }

    #[test]
    fn not_configured_without_container() {
        let config = CosmosConfig {
            endpoint: "https://acct.documents.azure.com:443/".into(),
            key: "a2V5".into(),
            database_id: "lt-game".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}
