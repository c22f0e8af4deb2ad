use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, and which optional backends are wired.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "coachposts",
        "storage": if state.config.database_url.is_some() { "postgres" } else { "memory" },
        "llm_configured": state.config.gemini_api_key.is_some(),
    }))
}
