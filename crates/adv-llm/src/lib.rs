//! # adv-llm
//!
//! Chat-completion client for the L ≡ T adversary.
//!
//! Sends one case (proposed truth + truth history) to an Azure OpenAI
//! deployment with the fixed adversary system prompt, requests output
//! constrained to the verdict schema, and validates what comes back.

mod error;
mod http;
pub mod prompt;
mod wire;

pub use error::CompletionError;

use std::future::Future;
use std::time::Duration;

use adv_config::{OpenAiConfig, ResponseFormatMode};
use adv_core::entities::{TruthPayload, Verdict};
use adv_schema::SchemaRegistry;

use crate::http::check_response;
use crate::wire::{ChatRequest, ChatResponse};

/// Something that can judge a proposed truth against its history.
pub trait CompletionClient {
    /// Ask for a verdict on `payload`.
    ///
    /// The returned verdict has passed schema validation; its `id` is whatever
    /// the model chose and is expected to be replaced by the caller.
    fn evaluate(
        &self,
        payload: &TruthPayload,
    ) -> impl Future<Output = Result<Verdict, CompletionError>> + Send;
}

/// Azure OpenAI chat-completions client bound to a single deployment.
pub struct AzureOpenAiClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    temperature: f32,
    response_format: ResponseFormatMode,
    schema: SchemaRegistry,
}

impl AzureOpenAiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Client`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(config: &OpenAiConfig) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("adversary/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Client(e.to_string()))?;

        Ok(Self {
            http,
            url: config.chat_completions_url(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            response_format: config.response_format,
            schema: SchemaRegistry::new(),
        })
    }

    /// The chat-completions URL this client posts to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CompletionClient for AzureOpenAiClient {
    async fn evaluate(&self, payload: &TruthPayload) -> Result<Verdict, CompletionError> {
        let request = ChatRequest::for_payload(payload, self.temperature, self.response_format)?;

        let resp = self
            .http
            .post(&self.url)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let body: ChatResponse = resp.json().await?;
        let content = body.into_content()?;
        tracing::debug!(bytes = content.len(), "completion received");

        Ok(self.schema.parse_verdict(&content)?)
    }
}
