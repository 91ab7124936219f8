//! Chat orchestration for synchronous and streaming guidance turns.

use std::sync::Arc;
use std::time::Instant;

use async_stream::stream;
use futures_util::StreamExt;
use scommon::{Clock, SystemClock};
use sprovider::{
    ModelRequest, ModelResponse, NoopOperationHooks, OPERATION_COMPLETE, OPERATION_STREAM,
    ProviderError, ProviderId, ProviderOperationHooks, ProviderRegistry, ResolvedProvider,
};

use crate::{
    ChatChunkStream, ChatError, ChatRequest, ChatResponse, GuidanceExtractor, GuidanceResult,
    PromptComposer, QuickResponse, StreamChunk, quick,
};

#[derive(Clone)]
pub struct ChatService {
    registry: Arc<ProviderRegistry>,
    composer: PromptComposer,
    hooks: Arc<dyn ProviderOperationHooks>,
    clock: Arc<dyn Clock>,
    guidance: GuidanceExtractor,
}

impl ChatService {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self::builder(registry).build()
    }

    pub fn builder(registry: Arc<ProviderRegistry>) -> ChatServiceBuilder {
        ChatServiceBuilder::new(registry)
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        validate_message(&request)?;
        let resolved = self.registry.resolve(request.provider.as_deref())?;
        let model_request = self.model_request(&request);

        let response = complete_observed(self.hooks.as_ref(), &resolved, model_request).await?;

        Ok(ChatResponse {
            text: response.text,
            provider: resolved.id.to_string(),
            timestamp: self.clock.now(),
        })
    }

    /// Validation failures are returned before any chunk is produced. Every
    /// other failure, including opening the upstream stream, becomes the
    /// terminal error chunk. Dropping the stream stops the upstream and
    /// reports the call as cancelled.
    pub fn handle_stream(&self, request: ChatRequest) -> Result<ChatChunkStream, ChatError> {
        validate_message(&request)?;
        let model_request = self.model_request(&request).enable_streaming();
        let registry = Arc::clone(&self.registry);
        let hooks = Arc::clone(&self.hooks);
        let requested = request.provider;

        let chunks = stream! {
            let resolved = match registry.resolve(requested.as_deref()) {
                Ok(resolved) => resolved,
                Err(err) => {
                    yield StreamChunk::error(err.to_string());
                    return;
                }
            };

            let mut call = ObservedCall::start(hooks.as_ref(), &resolved.id, OPERATION_STREAM);

            let mut fragments = match resolved.provider.stream(model_request).await {
                Ok(fragments) => fragments,
                Err(err) => {
                    call.failure(&err);
                    yield StreamChunk::error(err.to_string());
                    return;
                }
            };

            let provider = resolved.id.to_string();
            while let Some(fragment) = fragments.next().await {
                match fragment {
                    Ok(text) => yield StreamChunk::content(text, provider.clone()),
                    Err(err) => {
                        call.failure(&err);
                        yield StreamChunk::error(err.to_string());
                        return;
                    }
                }
            }

            call.success();
            yield StreamChunk::Done;
        };

        Ok(Box::pin(chunks))
    }

    pub fn quick_responses(&self) -> &'static [QuickResponse] {
        quick::quick_responses()
    }

    pub async fn guidance(&self, topic: &str) -> Result<GuidanceResult, ChatError> {
        self.guidance.guidance(topic).await
    }

    fn model_request(&self, request: &ChatRequest) -> ModelRequest {
        let prompt = self
            .composer
            .compose(request.context.as_deref(), &request.message);
        ModelRequest::new(prompt.into_messages())
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("providers", &self.registry.ids().collect::<Vec<_>>())
            .field("guidance", &self.guidance)
            .finish()
    }
}

pub struct ChatServiceBuilder {
    registry: Arc<ProviderRegistry>,
    hooks: Arc<dyn ProviderOperationHooks>,
    clock: Arc<dyn Clock>,
    guidance_provider: Option<ProviderId>,
}

impl ChatServiceBuilder {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            hooks: Arc::new(NoopOperationHooks),
            clock: Arc::new(SystemClock),
            guidance_provider: None,
        }
    }

    pub fn hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn guidance_provider(mut self, provider: impl Into<ProviderId>) -> Self {
        self.guidance_provider = Some(provider.into());
        self
    }

    pub fn build(self) -> ChatService {
        let mut guidance = GuidanceExtractor::new(Arc::clone(&self.registry), Arc::clone(&self.hooks));
        if let Some(provider) = self.guidance_provider {
            guidance = guidance.with_provider(provider);
        }

        ChatService {
            registry: self.registry,
            composer: PromptComposer::new(),
            hooks: self.hooks,
            clock: self.clock,
            guidance,
        }
    }
}

/// Whitespace-only messages are rejected; accepted messages are forwarded
/// untouched.
fn validate_message(request: &ChatRequest) -> Result<(), ChatError> {
    if request.message.trim().is_empty() {
        return Err(ChatError::validation("message required"));
    }
    Ok(())
}

/// Pairs `on_start` with exactly one terminal hook. A call dropped before it
/// settles reports `on_cancel`.
struct ObservedCall<'a> {
    hooks: &'a dyn ProviderOperationHooks,
    provider: &'a ProviderId,
    operation: &'static str,
    started: Instant,
    settled: bool,
}

impl<'a> ObservedCall<'a> {
    fn start(
        hooks: &'a dyn ProviderOperationHooks,
        provider: &'a ProviderId,
        operation: &'static str,
    ) -> Self {
        hooks.on_start(provider, operation);
        Self {
            hooks,
            provider,
            operation,
            started: Instant::now(),
            settled: false,
        }
    }

    fn success(&mut self) {
        self.settled = true;
        self.hooks
            .on_success(self.provider, self.operation, self.started.elapsed());
    }

    fn failure(&mut self, error: &ProviderError) {
        self.settled = true;
        self.hooks
            .on_failure(self.provider, self.operation, self.started.elapsed(), error);
    }
}

impl Drop for ObservedCall<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.hooks
                .on_cancel(self.provider, self.operation, self.started.elapsed());
        }
    }
}

pub(crate) async fn complete_observed(
    hooks: &dyn ProviderOperationHooks,
    resolved: &ResolvedProvider,
    request: ModelRequest,
) -> Result<ModelResponse, ProviderError> {
    let mut call = ObservedCall::start(hooks, &resolved.id, OPERATION_COMPLETE);

    match resolved.provider.complete(request).await {
        Ok(response) => {
            call.success();
            Ok(response)
        }
        Err(err) => {
            call.failure(&err);
            Err(err)
        }
    }
}
