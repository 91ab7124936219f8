//! Chat-completions HTTP payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};

use crate::ProviderError;

use super::types::{CompatFinishReason, CompatRequest, CompatResponse};

pub(crate) fn build_api_request(request: CompatRequest) -> Result<ApiRequest, ProviderError> {
    if request.messages.is_empty() {
        return Err(ProviderError::invalid_request(
            "chat request requires at least one message",
        ));
    }

    let messages = request
        .messages
        .into_iter()
        .map(|message| ApiMessage {
            role: message.role.to_string(),
            content: message.content,
        })
        .collect();

    Ok(ApiRequest {
        model: request.model,
        messages,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
        stream: request.stream,
    })
}

pub(crate) fn parse_finish_reason(value: Option<&str>) -> CompatFinishReason {
    match value {
        Some("stop") => CompatFinishReason::Stop,
        Some("length") => CompatFinishReason::Length,
        Some("cancelled") => CompatFinishReason::Cancelled,
        _ => CompatFinishReason::Other,
    }
}

/// Pulls a readable message out of an error body. Some backends wrap the
/// envelope in a one-element array.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        return Some(parsed.error.message);
    }

    serde_json::from_str::<Vec<ApiErrorEnvelope>>(body)
        .ok()?
        .into_iter()
        .next()
        .map(|envelope| envelope.error.message)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiChoice {
    pub message: ApiAssistantMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiAssistantMessage {
    pub content: Option<String>,
}

impl ApiResponse {
    pub(crate) fn into_response(self, fallback_model: &str) -> Result<CompatResponse, ProviderError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::transport("chat response did not include choices"))?;

        Ok(CompatResponse {
            model: self.model.unwrap_or_else(|| fallback_model.to_string()),
            content: choice.message.content.unwrap_or_default(),
            finish_reason: parse_finish_reason(choice.finish_reason.as_deref()),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiStreamResponse {
    #[serde(default)]
    pub choices: Vec<ApiStreamChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiStreamChoice {
    #[serde(default)]
    pub delta: ApiStreamDelta,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiStreamDelta {
    pub content: Option<String>,
}
