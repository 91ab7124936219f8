//! Chat request, response, stream chunk, and guidance wire types.

use std::pin::Pin;

use chrono::{DateTime, Utc};
use futures_core::Stream;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            provider: None,
            context: None,
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatResponse {
    pub text: String,
    /// The provider that actually answered, after default fallback.
    pub provider: String,
    pub timestamp: DateTime<Utc>,
}

/// One unit of a streamed reply. A stream ends with exactly one `Done` or
/// `Error` chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamChunk {
    Content { content: String, provider: String },
    Error { error: String },
    Done,
}

impl StreamChunk {
    pub fn content(content: impl Into<String>, provider: impl Into<String>) -> Self {
        Self::Content {
            content: content.into(),
            provider: provider.into(),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self::Error {
            error: error.into(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Content { .. })
    }
}

impl Serialize for StreamChunk {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Content { content, provider } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("content", content)?;
                map.serialize_entry("provider", provider)?;
                map.end()
            }
            Self::Error { error } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", error)?;
                map.end()
            }
            Self::Done => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("done", &true)?;
                map.end()
            }
        }
    }
}

pub type ChatChunkStream = Pin<Box<dyn Stream<Item = StreamChunk> + Send + 'static>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickResponse {
    pub id: &'static str,
    pub label: &'static str,
    pub prompt: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GuidanceRequest {
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub reference: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredGuidance {
    pub topic: String,
    pub verses: Vec<Verse>,
    pub explanation: String,
    pub practical_advice: String,
    pub prayer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackGuidance {
    pub topic: String,
    pub raw_response: String,
    parse_failed: bool,
}

impl FallbackGuidance {
    pub fn new(topic: impl Into<String>, raw_response: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            raw_response: raw_response.into(),
            parse_failed: true,
        }
    }
}

/// Result of a scripture guidance request: structured when the reply matched
/// the schema, otherwise the raw reply flagged with `parseFailed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GuidanceResult {
    Structured(StructuredGuidance),
    Fallback(FallbackGuidance),
}

impl GuidanceResult {
    pub fn topic(&self) -> &str {
        match self {
            Self::Structured(guidance) => &guidance.topic,
            Self::Fallback(fallback) => &fallback.topic,
        }
    }

    pub fn parse_failed(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}
