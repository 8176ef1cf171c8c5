//! Axum route handlers for candidate analysis.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::candidates::search::{compare, search, ComparisonView, SHORTLIST_SIZE};
use crate::errors::AppError;
use crate::models::candidate::{Candidate, CandidatePreview, CandidateProfile};
use crate::notice::Notice;
use crate::state::AppState;

/// Preview length on the search screen's candidate cards.
const CARD_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    pub position: String,
}

#[derive(Debug, Serialize)]
pub struct CandidateCard {
    pub candidate: Candidate,
    pub preview: CandidatePreview,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub position: String,
    pub found: usize,
    /// The first two candidates, ready for comparison.
    pub candidates: Vec<CandidateCard>,
    pub can_compare: bool,
    pub notice: Notice,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    #[serde(flatten)]
    pub view: ComparisonView,
    pub notice: Notice,
}

/// POST /api/v1/candidates/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let result = search(state.store.as_ref(), &req.position).await?;

    let notice = if result.total == 0 {
        Notice::info("Кандидатів для цієї позиції не знайдено")
    } else {
        Notice::success(format!(
            "Знайдено {} кандидатів. Показано перші {SHORTLIST_SIZE} для аналізу.",
            result.total
        ))
    };

    let candidates: Vec<CandidateCard> = result
        .shortlist
        .into_iter()
        .map(|candidate| CandidateCard {
            preview: CandidateProfile::from(&candidate).preview(CARD_PREVIEW_CHARS),
            candidate,
        })
        .collect();

    Ok(Json(SearchResponse {
        position: req.position,
        found: result.total,
        can_compare: candidates.len() == SHORTLIST_SIZE,
        candidates,
        notice,
    }))
}

/// POST /api/v1/candidates/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    let ai = state.ai().await;
    let view = compare(state.store.as_ref(), ai.as_ref(), &req.position).await?;
    Ok(Json(CompareResponse {
        view,
        notice: Notice::success("Аналіз кандидатів завершено"),
    }))
}
