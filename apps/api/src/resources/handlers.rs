//! Axum route handlers for the reference resource list.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resource::{NewResource, ResourceRow, ResourceUpdate};
use crate::state::AppState;

/// GET /api/v1/resources
pub async fn handle_list_resources(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResourceRow>>, AppError> {
    Ok(Json(state.store.list_resources().await?))
}

/// POST /api/v1/resources
pub async fn handle_add_resource(
    State(state): State<AppState>,
    Json(resource): Json<NewResource>,
) -> Result<(StatusCode, Json<ResourceRow>), AppError> {
    validate_title(&resource.title)?;
    validate_url(&resource.url)?;

    let row = state.store.add_resource(resource).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/v1/resources/:id
pub async fn handle_update_resource(
    State(state): State<AppState>,
    Path(resource_id): Path<Uuid>,
    Json(update): Json<ResourceUpdate>,
) -> Result<Json<ResourceRow>, AppError> {
    if let Some(title) = &update.title {
        validate_title(title)?;
    }
    if let Some(url) = &update.url {
        validate_url(url)?;
    }

    Ok(Json(state.store.update_resource(resource_id, update).await?))
}

/// DELETE /api/v1/resources/:id
pub async fn handle_delete_resource(
    State(state): State<AppState>,
    Path(resource_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete_resource(resource_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_url(url: &str) -> Result<(), AppError> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AppError::Validation(format!(
            "url must start with http:// or https://, got '{url}'"
        )));
    }
    Ok(())
}
