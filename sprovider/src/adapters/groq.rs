//! Groq provider over its OpenAI-compatible endpoint.

use std::sync::Arc;

use reqwest::Client;
use scommon::GenerationOptions;

use crate::adapters::openai_compat::{CompatHttpTransport, CompatTransport, CompatibleProvider};
use crate::{
    BoxedFragmentStream, CredentialStore, ModelProvider, ModelRequest, ModelResponse,
    ProviderError, ProviderFuture, ProviderId,
};

pub const GROQ_PROVIDER_ID: &str = "groq";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const GROQ_DEFAULT_MODEL: &str = "mixtral-8x7b-32768";
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Clone)]
pub struct GroqProvider {
    inner: CompatibleProvider,
}

impl GroqProvider {
    pub fn new(credentials: Arc<CredentialStore>, transport: Arc<dyn CompatTransport>) -> Self {
        Self {
            inner: CompatibleProvider::new(
                GROQ_PROVIDER_ID,
                credentials,
                transport,
                GROQ_DEFAULT_MODEL,
            )
            .with_defaults(GenerationOptions::default().with_temperature(0.7)),
        }
    }

    /// Re-labels the provider, for deployments registering several Groq models.
    pub fn with_id(self, id: impl Into<ProviderId>) -> Self {
        Self {
            inner: self.inner.with_id(id),
        }
    }

    pub fn with_model(self, model: impl Into<String>) -> Self {
        Self {
            inner: self.inner.with_model(model),
        }
    }

    pub fn with_defaults(self, defaults: GenerationOptions) -> Self {
        Self {
            inner: self.inner.with_defaults(defaults),
        }
    }

    pub fn default_http_transport(client: Client) -> CompatHttpTransport {
        CompatHttpTransport::new(client, GROQ_BASE_URL)
    }

    pub fn model(&self) -> &str {
        self.inner.model()
    }
}

impl ModelProvider for GroqProvider {
    fn id(&self) -> ProviderId {
        self.inner.id()
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        self.inner.complete(request)
    }

    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<BoxedFragmentStream<'a>, ProviderError>> {
        self.inner.stream(request)
    }
}
