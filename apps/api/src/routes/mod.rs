pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::enhance;
use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes", post(handlers::handle_create_resume))
        .route("/api/v1/resumes", get(handlers::handle_list_resumes))
        .route("/api/v1/resumes/:id", get(handlers::handle_get_resume))
        // Section saves (routed through the dual-mode writer)
        .route(
            "/api/v1/resumes/:id/experiences",
            put(handlers::handle_save_experiences),
        )
        .route(
            "/api/v1/resumes/:id/educations",
            put(handlers::handle_save_educations),
        )
        .route(
            "/api/v1/resumes/:id/skills",
            put(handlers::handle_save_skills),
        )
        .route(
            "/api/v1/resumes/:id/contact",
            put(handlers::handle_save_contact),
        )
        .route(
            "/api/v1/resumes/:id/summary",
            put(handlers::handle_save_summary),
        )
        .route(
            "/api/v1/local/snapshot",
            get(handlers::handle_local_snapshot),
        )
        // Enhancement proxy
        .route("/api/v1/enhance", post(enhance::handle_enhance))
        .with_state(state)
}
