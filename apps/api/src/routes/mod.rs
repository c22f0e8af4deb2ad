pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::formatting::handlers as formatting;
use crate::generation::handlers as generation;
use crate::library::handlers as library;
use crate::resources::handlers as resources;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Composer / reformatter
        .route("/api/v1/catalog", get(generation::handle_catalog))
        .route("/api/v1/prompts/preview", post(generation::handle_prompt_preview))
        .route("/api/v1/format", post(formatting::handle_format))
        // Generation
        .route("/api/v1/posts/generate", post(generation::handle_generate))
        .route("/api/v1/posts/:id/regenerate", post(generation::handle_regenerate))
        // Library
        .route("/api/v1/posts", get(library::handle_list_posts))
        .route(
            "/api/v1/posts/:id",
            get(library::handle_get_post).delete(library::handle_delete_post),
        )
        .route("/api/v1/posts/:id/used", post(library::handle_mark_used))
        .route(
            "/api/v1/profile",
            get(library::handle_get_profile).put(library::handle_put_profile),
        )
        .route(
            "/api/v1/resources",
            get(resources::handle_list_resources).post(resources::handle_add_resource),
        )
        .route(
            "/api/v1/resources/:id",
            patch(resources::handle_update_resource).delete(resources::handle_delete_resource),
        )
        .with_state(state)
}
