use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::session::{dashboard_for, Dashboard, Role};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RoleOption {
    pub id: Role,
    pub label: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub dashboard: Dashboard,
    /// "openai" when a key is stored, "demo" otherwise.
    pub ai_mode: &'static str,
}

/// GET /api/v1/roles
pub async fn handle_list_roles() -> Json<Vec<RoleOption>> {
    Json(
        Role::ALL
            .into_iter()
            .map(|role| RoleOption {
                id: role,
                label: role.label(),
            })
            .collect(),
    )
}

/// POST /api/v1/session
pub async fn handle_select_role(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    tracing::info!("Role selected: {:?}", req.role);
    let ai_mode = if state.credentials.has_credential().await {
        "openai"
    } else {
        "demo"
    };
    Ok(Json(SessionResponse {
        dashboard: dashboard_for(req.role),
        ai_mode,
    }))
}
