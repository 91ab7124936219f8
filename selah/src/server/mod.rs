//! HTTP binding. Every route lives under `/api`.

mod catalog;
mod chat;
mod error;
mod programs;

use axum::extract::State;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

use crate::AppState;

pub use error::ApiError;

pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/chat/stream", post(chat::chat_stream))
        .route("/chat/quick-responses", get(chat::quick_responses))
        .route("/chat/scripture", post(chat::scripture_guidance))
        .route("/schedule", post(programs::schedule))
        .route("/complete", post(programs::complete))
        .route("/health", get(health))
        .merge(catalog::routes())
}

/// `*` anywhere in the list allows every origin. Unparseable origins are
/// skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.iter().any(|origin| origin.trim() == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();
    layer.allow_origin(origins)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    let providers: Vec<_> = state
        .chat
        .registry()
        .ids()
        .map(|id| id.to_string())
        .collect();

    Json(json!({
        "status": "healthy",
        "service": "selah",
        "providers": providers,
    }))
}
