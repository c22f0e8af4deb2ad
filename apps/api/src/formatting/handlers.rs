//! Axum route handlers for the Platform Reformatter.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::formatting::{FormattedPost, Platform};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub content: String,
    #[serde(default)]
    pub platform: Platform,
}

/// POST /api/v1/format
///
/// Reformats existing content for a platform without calling the LLM.
/// Empty content is valid and yields zeroed metrics.
pub async fn handle_format(
    State(state): State<AppState>,
    Json(request): Json<FormatRequest>,
) -> Json<FormattedPost> {
    Json(state.formatter.format(&request.content, request.platform))
}
