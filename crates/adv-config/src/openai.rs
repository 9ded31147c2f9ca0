//! Azure OpenAI configuration.

use serde::{Deserialize, Serialize};

fn default_deployment() -> String {
    String::from("gpt4-logic")
}

/// Structured outputs (`json_schema`) need this API version or later.
fn default_api_version() -> String {
    String::from("2024-08-01-preview")
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_timeout_secs() -> u64 {
    120
}

/// How the completion request constrains the model's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormatMode {
    /// Strict JSON Schema generated from the verdict type.
    #[default]
    JsonSchema,
    /// Any JSON object; the schema is enforced only on our side.
    JsonObject,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`.
    #[serde(default)]
    pub endpoint: String,

    /// `api-key` credential for the resource.
    #[serde(default)]
    pub api_key: String,

    /// Chat model deployment name.
    #[serde(default = "default_deployment")]
    pub deployment: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Sampling temperature for every evaluation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub response_format: ResponseFormatMode,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            deployment: default_deployment(),
            api_version: default_api_version(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            response_format: ResponseFormatMode::default(),
        }
    }
}

impl OpenAiConfig {
    /// Check if the endpoint and credential are both set.
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty() && !self.api_key.is_empty()
    }

    /// Full chat-completions URL for the configured deployment.
    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}
