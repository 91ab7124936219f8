//! Program scheduling and completed-activity endpoints.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::{Value, json};
use sprogram::{CompletionNotice, ScheduleRequest};

use crate::AppState;
use crate::server::ApiError;

/// `startDate` defaults to today according to the state clock.
pub async fn schedule(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    let schedule = state.planner.plan(&request, state.clock.today())?;

    tracing::info!(
        phase = "program",
        event = "scheduled",
        program = %schedule.program.id,
        events = schedule.calendar_events.len()
    );

    Ok(Json(json!({
        "message": "Program scheduled successfully",
        "program": schedule.program,
        "calendarEvents": schedule.calendar_events,
    })))
}

pub async fn complete(
    State(state): State<AppState>,
    payload: Result<Json<CompletionNotice>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(notice) = payload?;
    let activity = state.recorder.record(notice)?;

    Ok(Json(json!({
        "message": "Activity completed successfully",
        "activity": activity,
    })))
}
