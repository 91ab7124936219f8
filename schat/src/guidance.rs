//! Scripture guidance requests with best-effort schema decoding.

use std::sync::Arc;

use serde::Deserialize;
use sprovider::{ModelRequest, ProviderId, ProviderOperationHooks, ProviderRegistry};

use crate::service::complete_observed;
use crate::{
    ChatError, FallbackGuidance, GuidanceResult, PromptComposer, StructuredGuidance, Verse,
};

#[derive(Clone)]
pub struct GuidanceExtractor {
    registry: Arc<ProviderRegistry>,
    provider: Option<ProviderId>,
    composer: PromptComposer,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl GuidanceExtractor {
    pub fn new(registry: Arc<ProviderRegistry>, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        Self {
            registry,
            provider: None,
            composer: PromptComposer::new(),
            hooks,
        }
    }

    /// Pins guidance requests to one provider instead of the registry default.
    pub fn with_provider(mut self, provider: impl Into<ProviderId>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub async fn guidance(&self, topic: &str) -> Result<GuidanceResult, ChatError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ChatError::validation("topic required"));
        }

        let resolved = self
            .registry
            .resolve(self.provider.as_ref().map(ProviderId::as_str))?;
        let request = ModelRequest::new(self.composer.guidance(topic).into_messages());
        let response = complete_observed(self.hooks.as_ref(), &resolved, request).await?;

        Ok(decode_guidance(topic, &response.text))
    }
}

impl std::fmt::Debug for GuidanceExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuidanceExtractor")
            .field("provider", &self.provider)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct RawGuidance {
    verses: Vec<Verse>,
    explanation: String,
    #[serde(alias = "practicalAdvice")]
    practical_advice: String,
    prayer: String,
}

/// Decodes a provider reply. Anything short of the full schema with at least
/// one verse becomes the fallback form carrying the raw text.
pub fn decode_guidance(topic: &str, raw: &str) -> GuidanceResult {
    let parsed = json_candidate(raw)
        .and_then(|candidate| serde_json::from_str::<RawGuidance>(candidate).ok())
        .filter(|guidance| !guidance.verses.is_empty());

    match parsed {
        Some(guidance) => GuidanceResult::Structured(StructuredGuidance {
            topic: topic.to_string(),
            verses: guidance.verses,
            explanation: guidance.explanation,
            practical_advice: guidance.practical_advice,
            prayer: guidance.prayer,
        }),
        None => GuidanceResult::Fallback(FallbackGuidance::new(topic, raw)),
    }
}

// Models often wrap JSON in a fenced block or a sentence of preamble.
fn json_candidate(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}
