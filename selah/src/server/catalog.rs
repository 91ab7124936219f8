//! Read-only catalog endpoints. Each kind gets a listing route and a lookup
//! route, wrapped in the kind's envelope key.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Map, Value};
use sprogram::CatalogKind;

use crate::AppState;
use crate::server::ApiError;

pub fn routes() -> Router<AppState> {
    CatalogKind::ALL
        .into_iter()
        .fold(Router::new(), |router, kind| {
            router
                .route(
                    &format!("/{}", kind.as_str()),
                    get(move |State(state): State<AppState>| async move {
                        list_entries(&state, kind)
                    }),
                )
                .route(
                    &format!("/{}/{{id}}", kind.as_str()),
                    get(
                        move |State(state): State<AppState>, Path(id): Path<String>| async move {
                            find_entry(&state, kind, &id)
                        },
                    ),
                )
        })
        .route("/inspiration", get(inspiration))
}

fn list_entries(state: &AppState, kind: CatalogKind) -> Result<Json<Value>, ApiError> {
    envelope(kind.list_key(), state.catalog.topics(kind))
}

fn find_entry(state: &AppState, kind: CatalogKind, id: &str) -> Result<Json<Value>, ApiError> {
    let entry = state.catalog.entry(kind, id)?;
    envelope(kind.entry_key(), entry)
}

async fn inspiration(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    envelope("inspiration", state.catalog.inspiration())
}

fn envelope(key: &str, value: impl Serialize) -> Result<Json<Value>, ApiError> {
    let mut body = Map::new();
    body.insert(key.to_string(), serde_json::to_value(value)?);
    Ok(Json(Value::Object(body)))
}
