pub mod health;

use axum::{routing::get, Router};

use crate::skills::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Catalog
        .route("/api/v1/subjects", get(handlers::handle_list_subjects))
        .route("/api/v1/careers", get(handlers::handle_list_careers))
        // Skill gap
        .route(
            "/api/v1/students/:row/profile",
            get(handlers::handle_student_profile),
        )
        .route("/api/v1/recommend", get(handlers::handle_recommend))
        .route("/api/v1/gap", get(handlers::handle_gap))
        .with_state(state)
}
