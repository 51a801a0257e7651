use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Career Skill Guidance System is running",
        "port": state.config.port
    }))
}

/// GET /health
/// Returns a simple status object with service version and dataset info.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skillgap-api",
        "dataset": {
            "rows": state.dataset.len(),
            "loaded_at": state.dataset.loaded_at(),
        },
        "careers": state.catalog.career_count()
    }))
}
