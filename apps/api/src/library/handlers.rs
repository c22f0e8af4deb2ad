//! Axum route handlers for saved posts and the coach profile.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::post::{GeneratedPostRow, PostStatus};
use crate::models::profile::{CoachProfile, ProfileInput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub status: PostStatus,
}

/// GET /api/v1/posts?status=used|unused
pub async fn handle_list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<GeneratedPostRow>>, AppError> {
    Ok(Json(state.store.list_posts(query.status).await?))
}

/// GET /api/v1/posts/:id
pub async fn handle_get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<GeneratedPostRow>, AppError> {
    Ok(Json(state.store.get_post(post_id).await?))
}

/// POST /api/v1/posts/:id/used
///
/// Marks a post as published. Calling it again leaves `used_at` unchanged.
pub async fn handle_mark_used(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<GeneratedPostRow>, AppError> {
    Ok(Json(state.store.mark_post_used(post_id).await?))
}

/// DELETE /api/v1/posts/:id
pub async fn handle_delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete_post(post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Result<Json<CoachProfile>, AppError> {
    match state.store.get_profile().await? {
        Some(profile) => Ok(Json(profile)),
        None => Ok(Json(
            state
                .store
                .save_profile(ProfileInput::named(&state.config.coach_name))
                .await?,
        )),
    }
}

/// PUT /api/v1/profile
///
/// Replaces the profile. The name becomes the default coach for generation.
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(input): Json<ProfileInput>,
) -> Result<Json<CoachProfile>, AppError> {
    let input = input.normalized();
    if input.name.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if input.school_name.is_empty() || input.team_name.is_empty() {
        return Err(AppError::Validation(
            "school_name and team_name cannot be empty".to_string(),
        ));
    }

    Ok(Json(state.store.save_profile(input).await?))
}
