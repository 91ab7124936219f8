//! Generic provider over any chat-completions compatible transport.

use std::sync::Arc;

use async_stream::try_stream;
use futures_util::StreamExt;
use scommon::GenerationOptions;

use crate::{
    BoxedFragmentStream, CredentialStore, ModelProvider, ModelRequest, ModelResponse,
    ProviderError, ProviderFuture, ProviderId,
};

use super::transport::CompatTransport;
use super::types::{CompatAuth, CompatMessage, CompatRequest};

#[derive(Clone)]
pub struct CompatibleProvider {
    id: ProviderId,
    credentials: Arc<CredentialStore>,
    transport: Arc<dyn CompatTransport>,
    model: String,
    defaults: GenerationOptions,
}

impl CompatibleProvider {
    pub fn new(
        id: impl Into<ProviderId>,
        credentials: Arc<CredentialStore>,
        transport: Arc<dyn CompatTransport>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            credentials,
            transport,
            model: model.into(),
            defaults: GenerationOptions::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ProviderId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_defaults(mut self, defaults: GenerationOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn defaults(&self) -> GenerationOptions {
        self.defaults
    }

    fn auth(&self) -> Result<CompatAuth, ProviderError> {
        let key = self.credentials.require_api_key(&self.id)?;
        Ok(CompatAuth::Bearer(key.clone()))
    }

    pub(crate) fn build_request(&self, request: ModelRequest, stream: bool) -> CompatRequest {
        let model = request
            .model
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| self.model.clone());

        CompatRequest {
            model,
            messages: request
                .messages
                .into_iter()
                .map(CompatMessage::from)
                .collect(),
            temperature: request.options.temperature.or(self.defaults.temperature),
            max_tokens: request.options.max_tokens.or(self.defaults.max_tokens),
            stream,
        }
    }
}

impl std::fmt::Debug for CompatibleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompatibleProvider")
            .field("id", &self.id)
            .field("model", &self.model)
            .field("has_api_key", &self.credentials.has_api_key(&self.id))
            .finish()
    }
}

impl ModelProvider for CompatibleProvider {
    fn id(&self) -> ProviderId {
        self.id.clone()
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = self.auth()?;
            let compat_request = self.build_request(request, false);
            let response = self.transport.complete(compat_request, auth).await?;
            Ok(response.into_model_response(self.id.clone()))
        })
    }

    fn stream<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<BoxedFragmentStream<'a>, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = self.auth()?;
            let compat_request = self.build_request(request, true);
            let mut chunks = self.transport.stream(compat_request, auth).await?;

            let stream = try_stream! {
                while let Some(chunk) = chunks.next().await {
                    yield chunk?;
                }
            };

            Ok(Box::pin(stream) as BoxedFragmentStream<'a>)
        })
    }
}
