//! Candidate search and comparison.
//!
//! Search lists the rows for a position; the first two rows (store order) form
//! the shortlist. Comparison sends exactly that shortlist to the AI service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::ai::AiService;
use crate::errors::AppError;
use crate::models::candidate::{Candidate, CandidatePreview, CandidateProfile};
use crate::models::comparison::{render_blocks, Block};
use crate::store::HrStore;

pub const SHORTLIST_SIZE: usize = 2;
/// Preview length on the comparison result screen.
pub const RESULT_PREVIEW_CHARS: usize = 300;

#[derive(Debug)]
pub struct SearchResult {
    pub total: usize,
    pub shortlist: Vec<Candidate>,
}

/// Result screen model.
#[derive(Debug, Serialize)]
pub struct ComparisonView {
    pub id: Uuid,
    pub position: String,
    pub generated_at: DateTime<Utc>,
    pub backend: &'static str,
    pub comparison: String,
    pub blocks: Vec<Block>,
    pub candidates: Vec<CandidatePreview>,
}

pub async fn search(store: &dyn HrStore, position: &str) -> Result<SearchResult, AppError> {
    if position.trim().is_empty() {
        return Err(AppError::Validation("Спочатку оберіть вакансію".to_string()));
    }

    let candidates = store
        .list_candidates_by_position(position)
        .await
        .map_err(AppError::action("Не вдалося завантажити кандидатів"))?;

    let total = candidates.len();
    tracing::info!("Found {total} candidates for '{position}'");

    Ok(SearchResult {
        total,
        shortlist: candidates.into_iter().take(SHORTLIST_SIZE).collect(),
    })
}

/// Searches `position` and compares the first two results.
pub async fn compare(
    store: &dyn HrStore,
    ai: &dyn AiService,
    position: &str,
) -> Result<ComparisonView, AppError> {
    let result = search(store, position).await?;

    if result.total == 0 {
        return Err(AppError::UnprocessableEntity(
            "Кандидатів для цієї позиції не знайдено".to_string(),
        ));
    }
    let [first, second] = match result.shortlist.as_slice() {
        [first, second] => [CandidateProfile::from(first), CandidateProfile::from(second)],
        _ => {
            return Err(AppError::UnprocessableEntity(
                "Для порівняння потрібно щонайменше два кандидати".to_string(),
            ))
        }
    };

    let comparison = ai
        .compare_candidates(position, &first, &second)
        .await
        .map_err(AppError::action("Не вдалося виконати аналіз"))?;

    Ok(ComparisonView {
        id: Uuid::new_v4(),
        position: position.to_string(),
        generated_at: Utc::now(),
        backend: ai.backend(),
        blocks: render_blocks(&comparison),
        comparison,
        candidates: vec![
            first.preview(RESULT_PREVIEW_CHARS),
            second.preview(RESULT_PREVIEW_CHARS),
        ],
    })
}
