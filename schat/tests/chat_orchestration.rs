use std::sync::{Arc, Mutex};

use futures_util::StreamExt;
use schat::{ChatErrorKind, ChatRequest, ChatService, GuidanceResult, StreamChunk};
use sprovider::{
    BoxedFragmentStream, ModelProvider, ModelRequest, ModelResponse, ProviderError,
    ProviderFuture, ProviderId, ProviderRegistry, StopReason, VecFragmentStream,
};

#[derive(Debug)]
struct ScriptedProvider {
    id: &'static str,
    reply: String,
    fragments: Vec<Result<String, ProviderError>>,
    calls: Mutex<usize>,
}

impl ScriptedProvider {
    fn new(id: &'static str, reply: &str) -> Self {
        Self {
            id,
            reply: reply.to_string(),
            fragments: Vec::new(),
            calls: Mutex::new(0),
        }
    }

    fn with_fragments(mut self, fragments: Vec<Result<String, ProviderError>>) -> Self {
        self.fragments = fragments;
        self
    }

    fn calls(&self) -> usize {
        *self.calls.lock().expect("calls lock")
    }
}

impl ModelProvider for ScriptedProvider {
    fn id(&self) -> ProviderId {
        ProviderId::new(self.id)
    }

    fn complete<'a>(
        &'a self,
        _request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            *self.calls.lock().expect("calls lock") += 1;
            Ok(ModelResponse {
                provider: self.id(),
                model: "scripted".to_string(),
                text: self.reply.clone(),
                stop_reason: StopReason::EndTurn,
            })
        })
    }

    fn stream<'a>(
        &'a self,
        _request: ModelRequest,
    ) -> ProviderFuture<'a, Result<BoxedFragmentStream<'a>, ProviderError>> {
        Box::pin(async move {
            *self.calls.lock().expect("calls lock") += 1;
            Ok(Box::pin(VecFragmentStream::new(self.fragments.clone())) as BoxedFragmentStream<'a>)
        })
    }
}

fn service_with(providers: Vec<Arc<ScriptedProvider>>) -> ChatService {
    let mut registry = ProviderRegistry::new();
    for provider in providers {
        registry.register_arc(provider);
    }
    ChatService::new(Arc::new(registry))
}

#[tokio::test]
async fn unknown_provider_falls_back_to_first_listed() {
    let gemini = Arc::new(ScriptedProvider::new("gemini", "from gemini"));
    let groq = Arc::new(ScriptedProvider::new("groq", "from groq"));
    let service = service_with(vec![gemini.clone(), groq.clone()]);

    let response = service
        .handle(ChatRequest::new("hello").with_provider("claude"))
        .await
        .expect("fallback succeeds");
    assert_eq!(response.provider, "gemini");
    assert_eq!(response.text, "from gemini");

    let response = service
        .handle(ChatRequest::new("hello").with_provider("groq"))
        .await
        .expect("explicit provider succeeds");
    assert_eq!(response.provider, "groq");
    assert_eq!(groq.calls(), 1);
}

#[tokio::test]
async fn empty_message_is_rejected_without_provider_call() {
    let gemini = Arc::new(ScriptedProvider::new("gemini", "unused"));
    let service = service_with(vec![gemini.clone()]);

    let error = service
        .handle(ChatRequest::default())
        .await
        .expect_err("empty message");
    assert_eq!(error.kind, ChatErrorKind::Validation);
    assert_eq!(error.message, "message required");

    let error = service
        .handle_stream(ChatRequest::new("  \n "))
        .err()
        .expect("blank message");
    assert_eq!(error.kind, ChatErrorKind::Validation);
    assert_eq!(gemini.calls(), 0);
}

#[tokio::test]
async fn stream_forwards_fragments_then_done() {
    let gemini = Arc::new(ScriptedProvider::new("gemini", "").with_fragments(vec![
        Ok("A".to_string()),
        Ok("B".to_string()),
        Ok("C".to_string()),
    ]));
    let service = service_with(vec![gemini]);

    let chunks = service
        .handle_stream(ChatRequest::new("hello"))
        .expect("stream starts")
        .collect::<Vec<_>>()
        .await;

    assert_eq!(
        chunks,
        vec![
            StreamChunk::content("A", "gemini"),
            StreamChunk::content("B", "gemini"),
            StreamChunk::content("C", "gemini"),
            StreamChunk::Done,
        ]
    );
}

#[tokio::test]
async fn stream_failure_after_first_fragment_terminates_with_error() {
    let gemini = Arc::new(ScriptedProvider::new("gemini", "").with_fragments(vec![
        Ok("A".to_string()),
        Err(ProviderError::transport("connection reset")),
        Ok("B".to_string()),
    ]));
    let service = service_with(vec![gemini]);

    let chunks = service
        .handle_stream(ChatRequest::new("hello"))
        .expect("stream starts")
        .collect::<Vec<_>>()
        .await;

    assert_eq!(
        chunks,
        vec![
            StreamChunk::content("A", "gemini"),
            StreamChunk::error("transport: connection reset"),
        ]
    );
    assert_eq!(chunks.iter().filter(|chunk| chunk.is_terminal()).count(), 1);
}

#[tokio::test]
async fn guidance_returns_structured_or_fallback_forms() {
    let structured = r#"{"topic":"forgiveness","verses":[{"reference":"Matthew 6:14","text":"For if you forgive other people..."}],"explanation":"e","practical_advice":"a","prayer":"p"}"#;
    let service = service_with(vec![Arc::new(ScriptedProvider::new("gemini", structured))]);

    let result = service.guidance("forgiveness").await.expect("guidance");
    let GuidanceResult::Structured(guidance) = result else {
        panic!("expected structured guidance");
    };
    assert!(!guidance.verses.is_empty());

    let service = service_with(vec![Arc::new(ScriptedProvider::new(
        "gemini",
        "Forgive as you have been forgiven.",
    ))]);
    let result = service.guidance("forgiveness").await.expect("guidance");
    assert!(result.parse_failed());
    let value = serde_json::to_value(&result).expect("json");
    assert_eq!(value["rawResponse"], "Forgive as you have been forgiven.");

    let error = service.guidance("  ").await.expect_err("topic required");
    assert_eq!(error.kind, ChatErrorKind::Validation);
}

#[tokio::test]
async fn guidance_provider_override_is_honored() {
    let gemini = Arc::new(ScriptedProvider::new("gemini", "gemini text"));
    let groq = Arc::new(ScriptedProvider::new("groq", "groq text"));
    let mut registry = ProviderRegistry::new();
    registry.register_arc(gemini.clone());
    registry.register_arc(groq.clone());

    let service = ChatService::builder(Arc::new(registry))
        .guidance_provider("groq")
        .build();
    service.guidance("hope").await.expect("guidance");

    assert_eq!(gemini.calls(), 0);
    assert_eq!(groq.calls(), 1);
}
