//! Axum route handlers for the Resume API.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeJob, ResumeSections};
use crate::render::latex::generate_latex;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub user_id: Uuid,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub job_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResumeRequest {
    pub sections: Option<ResumeSections>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Runs the whole pipeline before responding. The job id comes back whether the run
/// completed or failed; clients read the outcome from the status endpoint.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let job_id = state
        .orchestrator
        .submit_job(request.user_id, &request.job_description)
        .await?;
    Ok(Json(GenerateResponse { job_id }))
}

/// GET /api/v1/resumes/jobs/:job_id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ResumeJob>, AppError> {
    Ok(Json(state.orchestrator.get_job(job_id).await?))
}

/// PUT /api/v1/resumes/:job_id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(request): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeJob>, AppError> {
    let job = state
        .orchestrator
        .update_final_resume(job_id, request.sections)
        .await?;
    Ok(Json(job))
}

/// GET /api/v1/resumes/:job_id/latex
///
/// Exports the final resume, falling back to the generated sections when the run
/// has not reached completion.
pub async fn handle_export_latex(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let job = state.orchestrator.get_job(job_id).await?;
    let sections = job
        .final_resume
        .or(job.sections)
        .ok_or_else(|| AppError::Validation(format!("Job {job_id} has no resume sections yet")))?;

    let basic_info = state
        .profiles
        .fetch_profile(job.user_id)
        .await?
        .map(|profile| profile.basic_info)
        .unwrap_or_default();

    let latex = generate_latex(&sections, &basic_info);
    Ok(([(header::CONTENT_TYPE, "application/x-tex; charset=utf-8")], latex))
}
