//! HTTP handlers for roast session endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use shared::{EventRow, RoastEvent, TraceSample};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::roasting::{
    GenerateProfileInput, RecordEventInput, RoastingService, SampleReading, SessionSnapshot,
    SessionSummary, StartRoastInput, StatisticsView,
};
use crate::AppState;

// ============================================================================
// Registry Handlers
// ============================================================================

/// Open a new idle roast session
pub async fn create_session(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<SessionSnapshot>)> {
    let session = state.roasting.create_session().await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// List open roast sessions
pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<SessionSummary>> {
    Json(state.roasting.list_sessions().await)
}

/// Get a roast session by ID
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<SessionSnapshot>> {
    let session = state.roasting.get_session(session_id).await?;
    Ok(Json(session))
}

/// Delete a roast session
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.roasting.delete_session(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Lifecycle Handlers
// ============================================================================

/// Generate a profile and attach it to the session
pub async fn set_profile(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<GenerateProfileInput>,
) -> AppResult<Json<SessionSnapshot>> {
    let session = state.roasting.set_profile(session_id, input).await?;
    Ok(Json(session))
}

/// Start the roast. The batch body is optional.
pub async fn start_roast(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    input: Option<Json<StartRoastInput>>,
) -> AppResult<Json<SessionSnapshot>> {
    let input = input.map(|Json(input)| input).unwrap_or_default();
    let session = state.roasting.start(session_id, input).await?;
    Ok(Json(session))
}

/// Record an operator event
pub async fn record_event(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(input): Json<RecordEventInput>,
) -> AppResult<(StatusCode, Json<RoastEvent>)> {
    let event = state.roasting.record_event(session_id, input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Finish the roast
pub async fn finish_roast(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<SessionSnapshot>> {
    let session = state.roasting.finish(session_id).await?;
    Ok(Json(session))
}

/// Return a finished session to idle
pub async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<SessionSnapshot>> {
    let session = state.roasting.reset(session_id).await?;
    Ok(Json(session))
}

/// Take a live temperature reading
pub async fn tick(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<TraceSample>> {
    let reading = state.roasting.tick(session_id).await?;
    Ok(Json(reading))
}

// ============================================================================
// Event Log Handlers
// ============================================================================

/// Query parameters for the event log
#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub kind: Option<String>,
    pub format: Option<String>, // "json" or "csv"
}

/// Get the event log, optionally filtered by kind
pub async fn list_events(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<EventsQuery>,
) -> AppResult<Response> {
    let events = state
        .roasting
        .events(session_id, query.kind.as_deref())
        .await?;

    if query.format.as_deref() == Some("csv") {
        let rows: Vec<EventRow> = events.iter().map(EventRow::from).collect();
        let csv = RoastingService::export_to_csv(&rows)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"roast_events.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(events).into_response())
    }
}

/// Clear the event log
pub async fn clear_events(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<SessionSnapshot>> {
    let session = state.roasting.clear_events(session_id).await?;
    Ok(Json(session))
}

// ============================================================================
// Query Handlers
// ============================================================================

/// Query parameters for sampling the profile
#[derive(Debug, Deserialize)]
pub struct SampleQuery {
    pub elapsed: f64,
}

/// Expected temperature at an elapsed time
pub async fn sample(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<SampleQuery>,
) -> AppResult<Json<SampleReading>> {
    let reading = state.roasting.sample(session_id, query.elapsed).await?;
    Ok(Json(reading))
}

/// Display statistics for the session
pub async fn get_statistics(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<StatisticsView>> {
    let statistics = state.roasting.statistics(session_id).await?;
    Ok(Json(statistics))
}
