use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use selah::sprovider::{
    BoxedFragmentStream, ModelRequest, ModelResponse, ProviderFuture, StopReason,
    VecFragmentStream,
};
use selah::{
    AppConfig, AppState, FixedClock, ModelProvider, ProviderError, ProviderId, ProviderRegistry,
    StaticCatalog, chat_service, server,
};

const STRUCTURED_REPLY: &str = r#"Here you go:
{"verses":[{"reference":"Matthew 6:14","text":"For if you forgive others..."}],
 "explanation":"Forgiveness frees the heart.",
 "practicalAdvice":"Name one person to release today.",
 "prayer":"Lord, teach me to forgive."}"#;

#[derive(Debug)]
struct FakeProvider {
    id: &'static str,
    reply: Result<String, ProviderError>,
    fragments: Vec<Result<String, ProviderError>>,
    calls: Mutex<usize>,
}

impl FakeProvider {
    fn replying(id: &'static str, reply: &str) -> Self {
        Self {
            id,
            reply: Ok(reply.to_string()),
            fragments: Vec::new(),
            calls: Mutex::new(0),
        }
    }

    fn failing(id: &'static str, error: ProviderError) -> Self {
        Self {
            id,
            reply: Err(error.clone()),
            fragments: vec![Err(error)],
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

impl ModelProvider for FakeProvider {
    fn id(&self) -> ProviderId {
        ProviderId::new(self.id)
    }

    fn complete<'a>(
        &'a self,
        _request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            *self.calls.lock().expect("calls lock") += 1;
            let text = self.reply.clone()?;
            Ok(ModelResponse {
                provider: self.id(),
                model: "fake".to_string(),
                text,
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

fn app_with(providers: Vec<Arc<FakeProvider>>) -> Router {
    let mut registry = ProviderRegistry::new();
    for provider in providers {
        registry.register_arc(provider);
    }

    let chat = chat_service(Arc::new(registry), &AppConfig::default());
    let catalog = Arc::new(StaticCatalog::embedded().expect("embedded catalog parses"));
    let state = AppState::new(chat, catalog)
        .with_clock(Arc::new(FixedClock::from_timestamp(1_704_067_200)));

    server::router(state, &["*".to_string()])
}

fn app() -> Router {
    app_with(vec![Arc::new(FakeProvider::replying("gemini", "Peace be with you"))])
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request handled");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let value = serde_json::from_slice(&body).expect("json body");
    (status, value)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn sse_payloads(body: &str) -> Vec<Value> {
    body.lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| serde_json::from_str(data.trim_start()).expect("event data is json"))
        .collect()
}

#[tokio::test]
async fn chat_echoes_resolved_provider_for_unknown_identifier() {
    let (status, body) = send(
        app(),
        post("/api/chat", json!({ "message": "I feel anxious", "provider": "claude" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Peace be with you");
    assert_eq!(body["provider"], "gemini");
    assert_eq!(body["timestamp"], "2024-01-01T00:00:00Z");
}

#[tokio::test]
async fn chat_rejects_missing_message_without_calling_provider() {
    let provider = Arc::new(FakeProvider::replying("gemini", "unused"));
    let app = app_with(vec![provider.clone()]);

    let (status, body) = send(app, post("/api/chat", json!({ "context": "earlier" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "message required" }));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn chat_provider_failure_is_500_with_details() {
    let app = app_with(vec![Arc::new(FakeProvider::failing(
        "gemini",
        ProviderError::timeout("upstream timed out"),
    ))]);

    let (status, body) = send(app, post("/api/chat", json!({ "message": "hello" }))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "An error occurred while processing your request");
    assert!(
        body["details"]
            .as_str()
            .expect("details present")
            .contains("upstream timed out")
    );
}

#[tokio::test]
async fn malformed_json_is_a_structured_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request builds");

    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON body");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn chat_stream_frames_each_fragment_then_done() {
    let provider = FakeProvider::replying("gemini", "unused").with_fragments(vec![
        Ok("A".to_string()),
        Ok("B".to_string()),
        Ok("C".to_string()),
    ]);
    let app = app_with(vec![Arc::new(provider)]);

    let response = app
        .oneshot(post("/api/chat/stream", json!({ "message": "hello" })))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .expect("ascii header")
            .starts_with("text/event-stream")
    );

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("stream body reads")
        .to_bytes();
    let payloads = sse_payloads(&String::from_utf8_lossy(&bytes));

    assert_eq!(
        payloads,
        vec![
            json!({ "content": "A", "provider": "gemini" }),
            json!({ "content": "B", "provider": "gemini" }),
            json!({ "content": "C", "provider": "gemini" }),
            json!({ "done": true }),
        ]
    );
}

#[tokio::test]
async fn chat_stream_failure_mid_stream_ends_with_error_event() {
    let provider = FakeProvider::replying("gemini", "unused").with_fragments(vec![
        Ok("A".to_string()),
        Err(ProviderError::transport("connection reset")),
        Ok("never".to_string()),
    ]);
    let app = app_with(vec![Arc::new(provider)]);

    let response = app
        .oneshot(post("/api/chat/stream", json!({ "message": "hello" })))
        .await
        .expect("request handled");
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("stream body reads")
        .to_bytes();
    let payloads = sse_payloads(&String::from_utf8_lossy(&bytes));

    assert_eq!(payloads.len(), 2);
    assert_eq!(payloads[0], json!({ "content": "A", "provider": "gemini" }));
    assert!(
        payloads[1]["error"]
            .as_str()
            .expect("error text")
            .contains("connection reset")
    );
}

#[tokio::test]
async fn chat_stream_validation_fails_before_streaming() {
    let (status, body) = send(app(), post("/api/chat/stream", json!({ "message": "  " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "message required");
}

#[tokio::test]
async fn quick_responses_are_listed_in_order() {
    let (status, body) = send(app(), get("/api/chat/quick-responses")).await;

    assert_eq!(status, StatusCode::OK);
    let items = body["quickResponses"].as_array().expect("array");
    assert_eq!(items.len(), 6);
    assert_eq!(items[0]["id"], "peace");
    assert!(items[0]["label"].is_string());
    assert!(items[0]["prompt"].is_string());
}

#[tokio::test]
async fn scripture_guidance_returns_structured_or_fallback_form() {
    let structured = app_with(vec![Arc::new(FakeProvider::replying(
        "gemini",
        STRUCTURED_REPLY,
    ))]);
    let (status, body) = send(
        structured,
        post("/api/chat/scripture", json!({ "topic": "forgiveness" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topic"], "forgiveness");
    assert_eq!(body["verses"][0]["reference"], "Matthew 6:14");
    assert!(body.get("parseFailed").is_none());

    let free_text = app_with(vec![Arc::new(FakeProvider::replying(
        "gemini",
        "Forgive as you have been forgiven.",
    ))]);
    let (status, body) = send(
        free_text,
        post("/api/chat/scripture", json!({ "topic": "forgiveness" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["parseFailed"], true);
    assert_eq!(body["rawResponse"], "Forgive as you have been forgiven.");
}

#[tokio::test]
async fn scripture_guidance_requires_topic() {
    let (status, body) = send(app(), post("/api/chat/scripture", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "topic required");
}

#[tokio::test]
async fn schedule_expands_program_into_daily_events() {
    let (status, body) = send(
        app(),
        post(
            "/api/schedule",
            json!({
                "type": "devotion",
                "topicId": "stress",
                "topicTitle": "Overcoming Stress",
                "dailyTime": "07:00",
                "startDate": "2024-01-01",
                "durationDays": 7
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Program scheduled successfully");
    assert_eq!(body["program"]["endDate"], "2024-01-07");
    assert_eq!(body["program"]["status"], "active");

    let events = body["calendarEvents"].as_array().expect("events");
    assert_eq!(events.len(), 7);
    assert_eq!(events[0]["date"], "2024-01-01");
    assert_eq!(events[6]["date"], "2024-01-07");
    assert!(events.iter().all(|event| event["time"] == "07:00"));
    assert!(events.iter().all(|event| event["durationMinutes"] == 30));
    assert_eq!(events[0]["title"], "Devotion: Overcoming Stress");
}

#[tokio::test]
async fn schedule_defaults_start_date_to_today_and_accepts_snake_case() {
    let (status, body) = send(
        app(),
        post(
            "/api/schedule",
            json!({ "type": "prayer", "topic_id": "morning", "time": "06:30", "duration_days": 3 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["program"]["startDate"], "2024-01-01");
    assert_eq!(body["program"]["endDate"], "2024-01-03");
}

#[tokio::test]
async fn schedule_reports_missing_fields() {
    let (status, body) = send(
        app(),
        post(
            "/api/schedule",
            json!({ "type": "devotion", "topicId": "stress", "dailyTime": "07:00" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields: durationDays");
    assert!(body.get("calendarEvents").is_none());
}

#[tokio::test]
async fn schedule_rejects_oversized_duration() {
    let (status, body) = send(
        app(),
        post(
            "/api/schedule",
            json!({
                "type": "meditation",
                "topicId": "calm",
                "dailyTime": "21:00",
                "durationDays": 90_000_000
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "durationDays must not exceed 366");
}

#[tokio::test]
async fn complete_builds_activity_record_with_defaults() {
    let (status, body) = send(
        app(),
        post("/api/complete", json!({ "type": "meditation", "topicId": "peace" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Activity completed successfully");

    let activity = &body["activity"];
    assert!(
        activity["id"]
            .as_str()
            .expect("id")
            .starts_with("meditation_peace_")
    );
    assert_eq!(activity["durationMinutes"], 5);
    assert_eq!(activity["notes"], "");
    assert!(activity["rating"].is_null());
    assert_eq!(activity["timestamp"], "2024-01-01T00:00:00Z");
}

#[tokio::test]
async fn complete_requires_type_and_topic() {
    let (status, body) = send(app(), post("/api/complete", json!({ "notes": "done" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields: type, topicId");
}

#[tokio::test]
async fn catalog_routes_use_kind_envelopes() {
    let (status, body) = send(app(), get("/api/devotions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topics"][0]["id"], "stress");

    let (status, body) = send(app(), get("/api/devotions/stress")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["devotion"]["id"], "stress");

    let (status, body) = send(app(), get("/api/accountability")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["areas"].as_array().expect("areas").len(), 3);

    let (status, body) = send(app(), get("/api/accountability/character")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["area"]["id"], "character");
}

#[tokio::test]
async fn unknown_catalog_entry_is_404() {
    let (status, body) = send(app(), get("/api/prayers/missing")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Prayer topic not found" }));
}

#[tokio::test]
async fn inspiration_and_health_respond() {
    let (status, body) = send(app(), get("/api/inspiration")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["inspiration"].as_array().expect("items").len(), 3);

    let (status, body) = send(app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["providers"], json!(["gemini"]));
}
