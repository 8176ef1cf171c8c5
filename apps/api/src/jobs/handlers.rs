//! Axum route handlers for the job-description editor.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::editor::{find_job, generate_draft, save_description};
use crate::models::job_description::JobDescription;
use crate::notice::Notice;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SelectedJobResponse {
    pub job: JobDescription,
    /// Stored description, or empty when the position has none yet.
    pub draft: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub job: JobDescription,
    pub draft: String,
    pub backend: &'static str,
    pub notice: Notice,
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub jobs: Vec<JobDescription>,
    pub notice: Notice,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/job-descriptions
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobDescription>>, AppError> {
    let jobs = state
        .store
        .list_job_descriptions()
        .await
        .map_err(AppError::action("Не вдалося завантажити список позицій"))?;
    Ok(Json(jobs))
}

/// GET /api/v1/job-descriptions/:id
pub async fn handle_select_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SelectedJobResponse>, AppError> {
    let job = find_job(state.store.as_ref(), &id).await?;
    Ok(Json(SelectedJobResponse {
        draft: job.draft(),
        job,
    }))
}

/// POST /api/v1/job-descriptions/:id/generate
///
/// Returns a draft for the position. The draft is not saved.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GenerateResponse>, AppError> {
    let ai = state.ai().await;
    let (job, draft) = generate_draft(state.store.as_ref(), ai.as_ref(), &id).await?;
    Ok(Json(GenerateResponse {
        job,
        draft,
        backend: ai.backend(),
        notice: Notice::success("Опис вакансії згенеровано"),
    }))
}

/// PUT /api/v1/job-descriptions/:id
///
/// Saves the description and returns the reloaded list.
pub async fn handle_save(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    let jobs = save_description(state.store.as_ref(), &id, &req.description).await?;
    Ok(Json(SaveResponse {
        jobs,
        notice: Notice::success("Опис вакансії збережено в Airtable"),
    }))
}
