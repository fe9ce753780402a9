pub mod extract;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/resumes/:id",
            get(resumes::handle_get_resume)
                .patch(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        // Template API
        .route("/api/templates", get(templates::handle_list_templates))
        .route("/api/templates/:id", get(templates::handle_get_template))
        // AI content API
        .route("/api/ai/generate", post(generation::handle_generate))
        .route("/api/ai/improve", post(generation::handle_improve))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
