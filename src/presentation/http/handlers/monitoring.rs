use crate::application::run_monitoring::dto::{RunStatus, RunSummary};
use crate::presentation::http::{errors::AppError, state::AppState};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// The trigger surface: one idempotent entry point that runs the whole
/// monitoring pipeline once and returns its summary.
pub async fn run_monitoring(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary: RunSummary = state.coordinator.run().await?;
    let status_code = match summary.status {
        RunStatus::Success | RunStatus::AlreadyRunning => StatusCode::OK,
        RunStatus::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    };
    Ok((status_code, Json(summary)))
}
