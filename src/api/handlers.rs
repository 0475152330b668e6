//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{error::TimerError, state::AppState};
use super::responses::{ApiResponse, DurationRequest, HealthResponse, StatusResponse};

fn internal_error(action: &str, e: TimerError) -> StatusCode {
    error!("Failed to {}: {}", action, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Handle PUT /duration - Store raw duration input
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let timer = state
        .controller
        .set_duration_input(request.input)
        .map_err(|e| internal_error("set duration input", e))?;

    state.record_action("duration");
    Ok(Json(ApiResponse::applied(
        format!("Duration input set to {:?}", timer.duration_input),
        timer,
    )))
}

/// Handle POST /start - Start a countdown from the current input
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state
        .controller
        .start()
        .map_err(|e| internal_error("start timer", e))?;

    state.record_action("start");
    if result.is_applied() {
        info!("Start endpoint called - countdown running");
    }
    Ok(Json(ApiResponse::from_intent(
        result,
        "Countdown started",
        "Invalid duration input, timer unchanged",
    )))
}

/// Handle POST /pause - Toggle pause/resume
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state
        .controller
        .toggle_pause()
        .map_err(|e| internal_error("toggle pause", e))?;

    state.record_action("pause");
    let applied = if result.snapshot().paused {
        "Countdown paused"
    } else {
        "Countdown resumed"
    };
    Ok(Json(ApiResponse::from_intent(
        result,
        applied,
        "Nothing to pause, timer unchanged",
    )))
}

/// Handle POST /reset - Stop and rewind the countdown
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state
        .controller
        .reset()
        .map_err(|e| internal_error("reset timer", e))?;

    state.record_action("reset");
    Ok(Json(ApiResponse::from_intent(
        result,
        "Countdown reset",
        "Countdown reset",
    )))
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = state
        .controller
        .snapshot()
        .map_err(|e| internal_error("read timer state", e))?;
    let last_expiry = state
        .controller
        .last_expiry()
        .map_err(|e| internal_error("read last expiry", e))?;

    let settings = state.controller.settings();
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        clock: settings.clock,
        tick_interval_ms: u64::try_from(settings.tick_interval.as_millis()).unwrap_or(u64::MAX),
        last_expiry,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
