//! Axum route handlers for the session API consumed by the view layer.

use axum::{extract::Multipart, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::gateway::{JOB_DESCRIPTION_FIELD, RESUMES_FIELD};
use crate::models::candidate::CandidateKey;
use crate::models::resume::ResumeFile;
use crate::state::AppState;
use crate::workflow::session::SessionSnapshot;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub key: CandidateKey,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutonomousScheduleRequest {
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmScheduleRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub meeting_date: String,
    #[serde(default)]
    pub meeting_time: String,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub message: String,
    pub submitted: usize,
    pub snapshot: SessionSnapshot,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot().await)
}

/// POST /api/v1/rankings
///
/// Multipart body: one `jobDescription` text field and any number of
/// `resumes` file fields. Other fields are ignored.
pub async fn handle_rank(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut job_description = String::new();
    let mut resumes = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == JOB_DESCRIPTION_FIELD {
            job_description = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Unreadable job description: {e}")))?;
        } else if name == RESUMES_FIELD {
            let file_name = field.file_name().unwrap_or("resume").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Unreadable resume '{file_name}': {e}")))?;
            let mut resume = ResumeFile::new(file_name, bytes);
            if let Some(content_type) = content_type {
                resume = resume.with_content_type(content_type);
            }
            resumes.push(resume);
        }
    }

    let outcome = state.session.rank(&job_description, &resumes).await?;
    if !outcome.is_applied() {
        tracing::debug!("Ranking response superseded by a newer fetch");
    }
    Ok(Json(state.session.snapshot().await))
}

/// POST /api/v1/interns
pub async fn handle_list_interns(
    State(state): State<AppState>,
    Json(request): Json<ListRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    state
        .session
        .list_candidates_for_role(&request.job_description)
        .await?;
    Ok(Json(state.session.snapshot().await))
}

/// POST /api/v1/selection/toggle
pub async fn handle_toggle(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    state.session.toggle(&request.key).await?;
    Ok(Json(state.session.snapshot().await))
}

/// POST /api/v1/selection/toggle-all
pub async fn handle_toggle_all(State(state): State<AppState>) -> Json<SessionSnapshot> {
    state.session.toggle_all().await;
    Json(state.session.snapshot().await)
}

/// POST /api/v1/schedule/dialog
pub async fn handle_open_dialog(
    State(state): State<AppState>,
) -> Result<Json<SessionSnapshot>, AppError> {
    state.session.open_schedule_dialog().await?;
    Ok(Json(state.session.snapshot().await))
}

/// DELETE /api/v1/schedule/dialog
pub async fn handle_cancel_dialog(State(state): State<AppState>) -> Json<SessionSnapshot> {
    state.session.cancel_schedule_dialog().await;
    Json(state.session.snapshot().await)
}

/// POST /api/v1/schedule/autonomous
pub async fn handle_schedule_autonomous(
    State(state): State<AppState>,
    Json(request): Json<AutonomousScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let result = state
        .session
        .schedule_autonomously(&request.job_description)
        .await?;
    Ok(Json(ScheduleResponse {
        message: result.message,
        submitted: result.submitted,
        snapshot: state.session.snapshot().await,
    }))
}

/// POST /api/v1/schedule/confirm
pub async fn handle_schedule_confirm(
    State(state): State<AppState>,
    Json(request): Json<ConfirmScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let result = state
        .session
        .confirm_schedule(
            &request.job_description,
            &request.meeting_date,
            &request.meeting_time,
        )
        .await?;
    Ok(Json(ScheduleResponse {
        message: result.message,
        submitted: result.submitted,
        snapshot: state.session.snapshot().await,
    }))
}

/// DELETE /api/v1/notice
pub async fn handle_clear_notice(State(state): State<AppState>) -> Json<SessionSnapshot> {
    state.session.clear_notice().await;
    Json(state.session.snapshot().await)
}
