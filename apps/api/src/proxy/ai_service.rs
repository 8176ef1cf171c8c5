//! `ai-service`: action-discriminated AI proxy using the server-held key.
//!
//! Without a server key the answer is canned; a failed call also degrades to
//! canned text.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::ai::{AiService, FallbackAi};
use crate::models::candidate::CandidateProfile;
use crate::proxy::proxy_error;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum AiAction {
    GenerateJobDescription {
        position: String,
    },
    CompareCandidates {
        position: String,
        candidate1: CandidateProfile,
        candidate2: CandidateProfile,
    },
}

fn server_ai(state: &AppState) -> Arc<dyn AiService> {
    Arc::new(FallbackAi::new(state.ai_provider.for_server()))
}

/// POST /functions/v1/ai-service
pub async fn handle_ai_service(State(state): State<AppState>, body: Bytes) -> Response {
    let action: AiAction = match serde_json::from_slice(&body) {
        Ok(action) => action,
        Err(e) => return proxy_error(StatusCode::BAD_REQUEST, format!("Invalid request: {e}")),
    };

    let ai = server_ai(&state);

    let result = match &action {
        AiAction::GenerateJobDescription { position } => {
            ai.generate_job_description(position).await
        }
        AiAction::CompareCandidates {
            position,
            candidate1,
            candidate2,
        } => ai.compare_candidates(position, candidate1, candidate2).await,
    };

    match result {
        Ok(result) => Json(json!({ "result": result })).into_response(),
        Err(e) => proxy_error(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}
