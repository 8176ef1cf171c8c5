pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::candidates::handlers as candidates;
use crate::jobs::handlers as jobs;
use crate::proxy;
use crate::session::handlers as session;
use crate::settings::handlers as settings;
use crate::state::AppState;

/// The whole service. The proxy functions answer their own pre-flights, so
/// the permissive CORS layer wraps the screen routes only.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(screen_routes().layer(CorsLayer::permissive()))
        .nest("/functions/v1", proxy::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn screen_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_handler))
        // Role gate
        .route("/api/v1/roles", get(session::handle_list_roles))
        .route("/api/v1/session", post(session::handle_select_role))
        // Job-description editor
        .route("/api/v1/job-descriptions", get(jobs::handle_list_jobs))
        .route(
            "/api/v1/job-descriptions/:id",
            get(jobs::handle_select_job).put(jobs::handle_save),
        )
        .route(
            "/api/v1/job-descriptions/:id/generate",
            post(jobs::handle_generate),
        )
        // Candidate analysis
        .route("/api/v1/candidates/search", post(candidates::handle_search))
        .route("/api/v1/candidates/compare", post(candidates::handle_compare))
        // AI settings
        .route(
            "/api/v1/settings/ai",
            get(settings::handle_get_settings)
                .put(settings::handle_set_key)
                .delete(settings::handle_remove_key),
        )
}
