//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the REST gateway under a single Axum router: drawing
//! and revision lifecycle, markup and pin persistence, layer management,
//! and raw file upload/download. Clients are viewers embedding the markup
//! engine; every route is JSON except the `/files` byte routes.

pub mod drawings;
pub mod files;
pub mod layers;
pub mod markups;
pub mod pins;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full gateway router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/drawings", get(drawings::list_drawings).post(drawings::create_drawing))
        .route(
            "/api/drawings/{id}",
            get(drawings::get_drawing)
                .patch(drawings::update_drawing)
                .delete(drawings::delete_drawing),
        )
        .route(
            "/api/drawings/{id}/revisions",
            get(drawings::list_revisions).post(drawings::create_revision),
        )
        .route("/api/revisions/{id}", get(drawings::get_revision))
        .route(
            "/api/drawings/{id}/markups",
            get(markups::list_markups).post(markups::create_markup),
        )
        .route("/api/markups/{id}", delete(markups::delete_markup))
        .route("/api/markups/batch-delete", post(markups::batch_delete_markups))
        .route("/api/drawings/{id}/pins", get(pins::list_pins).post(pins::create_pin))
        .route("/api/pins/{id}", patch(pins::update_pin).delete(pins::delete_pin))
        .route("/api/drawings/{id}/layers", get(layers::list_layers).post(layers::create_layer))
        .route("/api/layers/{id}/visibility", patch(layers::set_visibility))
        .route("/api/layers/{id}", delete(layers::delete_layer))
        .route("/api/files", put(files::upload_file))
        .route("/files/{*path}", get(files::download_file))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_helpers::test_app_state;

    #[tokio::test]
    async fn router_assembles_with_every_route_bound() {
        // Axum panics at registration time on malformed paths or method
        // conflicts, so building the router is itself the assertion.
        let _router = app(test_app_state());
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        assert_eq!(healthz().await, StatusCode::OK);
    }
}
