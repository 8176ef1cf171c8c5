use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::notice::Notice;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetKeyRequest {
    pub api_key: String,
}

/// The key itself is never returned.
#[derive(Debug, Serialize)]
pub struct AiSettingsResponse {
    pub has_api_key: bool,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl AiSettingsResponse {
    fn new(has_api_key: bool, notice: Option<Notice>) -> Self {
        Self {
            has_api_key,
            mode: if has_api_key { "openai" } else { "demo" },
            notice,
        }
    }
}

/// GET /api/v1/settings/ai
pub async fn handle_get_settings(State(state): State<AppState>) -> Json<AiSettingsResponse> {
    Json(AiSettingsResponse::new(
        state.credentials.has_credential().await,
        None,
    ))
}

/// PUT /api/v1/settings/ai
pub async fn handle_set_key(
    State(state): State<AppState>,
    Json(req): Json<SetKeyRequest>,
) -> Result<Json<AiSettingsResponse>, AppError> {
    let present = state.credentials.set(&req.api_key).await?;
    Ok(Json(AiSettingsResponse::new(
        present,
        Some(Notice::success("OpenAI API ключ збережено")),
    )))
}

/// DELETE /api/v1/settings/ai
pub async fn handle_remove_key(
    State(state): State<AppState>,
) -> Result<Json<AiSettingsResponse>, AppError> {
    let present = state.credentials.clear().await?;
    Ok(Json(AiSettingsResponse::new(
        present,
        Some(Notice::info("OpenAI API ключ видалено")),
    )))
}
