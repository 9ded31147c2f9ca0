//! Chat-completions request and response bodies.

use adv_config::ResponseFormatMode;
use adv_core::entities::TruthPayload;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;
use crate::prompt::{ADVERSARY_SYSTEM_PROMPT, user_message};

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ResponseFormat {
    JsonObject,
    JsonSchema { json_schema: JsonSchemaFormat },
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonSchemaFormat {
    pub name: &'static str,
    pub strict: bool,
    pub schema: serde_json::Value,
}

impl ResponseFormat {
    pub fn for_mode(mode: ResponseFormatMode) -> Self {
        match mode {
            ResponseFormatMode::JsonObject => Self::JsonObject,
            ResponseFormatMode::JsonSchema => Self::JsonSchema {
                json_schema: JsonSchemaFormat {
                    name: adv_schema::RESPONSE_SCHEMA_NAME,
                    strict: true,
                    schema: adv_schema::response_format_schema(),
                },
            },
        }
    }
}

impl ChatRequest {
    /// System instruction plus the `INPUT:` user turn for one case.
    pub fn for_payload(
        payload: &TruthPayload,
        temperature: f32,
        mode: ResponseFormatMode,
    ) -> Result<Self, CompletionError> {
        Ok(Self {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: ADVERSARY_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_message(payload)?,
                },
            ],
            temperature,
            response_format: ResponseFormat::for_mode(mode),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: Option<ResponseMessage>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    pub content: Option<String>,
    pub refusal: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice.
    pub fn into_content(self) -> Result<String, CompletionError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyResponse)?;

        if choice.finish_reason.as_deref() == Some("content_filter") {
            return Err(CompletionError::Refused("content filter".into()));
        }

        let message = choice.message.ok_or(CompletionError::EmptyResponse)?;
        if let Some(refusal) = message.refusal {
            return Err(CompletionError::Refused(refusal));
        }

        message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }
}
