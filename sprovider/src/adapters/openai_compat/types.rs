//! Adapter-level request and response types and their mapping to shared models.

use crate::{Message, ModelResponse, ProviderId, SecretString, StopReason};

#[derive(Debug, Clone, PartialEq)]
pub struct CompatRequest {
    pub model: String,
    pub messages: Vec<CompatMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatMessage {
    pub role: &'static str,
    pub content: String,
}

impl From<Message> for CompatMessage {
    fn from(value: Message) -> Self {
        Self {
            role: value.role.as_str(),
            content: value.content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatFinishReason {
    Stop,
    Length,
    Cancelled,
    Other,
}

impl From<CompatFinishReason> for StopReason {
    fn from(value: CompatFinishReason) -> Self {
        match value {
            CompatFinishReason::Stop => StopReason::EndTurn,
            CompatFinishReason::Length => StopReason::MaxTokens,
            CompatFinishReason::Cancelled => StopReason::Cancelled,
            CompatFinishReason::Other => StopReason::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatResponse {
    pub model: String,
    pub content: String,
    pub finish_reason: CompatFinishReason,
}

impl CompatResponse {
    pub fn into_model_response(self, provider: ProviderId) -> ModelResponse {
        ModelResponse {
            provider,
            model: self.model,
            text: self.content,
            stop_reason: self.finish_reason.into(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum CompatAuth {
    Bearer(SecretString),
}

impl std::fmt::Debug for CompatAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("CompatAuth::Bearer([REDACTED])"),
        }
    }
}

impl CompatAuth {
    pub fn token(&self) -> &str {
        match self {
            Self::Bearer(secret) => secret.expose(),
        }
    }
}
