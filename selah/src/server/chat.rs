//! Chat, streaming chat, quick responses, and scripture guidance.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::{Stream, StreamExt};
use schat::{ChatRequest, ChatResponse, GuidanceRequest, GuidanceResult};
use serde_json::{Value, json};

use crate::AppState;
use crate::server::ApiError;

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state.chat.handle(request).await?;
    Ok(Json(response))
}

/// Validation failures answer 400 before any event is sent. Once streaming
/// starts, failures arrive as a terminal `{"error": ..}` event.
pub async fn chat_stream(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let Json(request) = payload?;
    let chunks = state.chat.handle_stream(request)?;
    let events = chunks.map(|chunk| Event::default().json_data(chunk));
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

pub async fn quick_responses(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "quickResponses": state.chat.quick_responses() }))
}

pub async fn scripture_guidance(
    State(state): State<AppState>,
    payload: Result<Json<GuidanceRequest>, JsonRejection>,
) -> Result<Json<GuidanceResult>, ApiError> {
    let Json(request) = payload?;
    let guidance = state.chat.guidance(&request.topic).await?;
    Ok(Json(guidance))
}
