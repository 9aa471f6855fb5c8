//! Layer routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use markup::doc::Layer;
use serde::Deserialize;
use uuid::Uuid;

use crate::services::layers::{self, LayerError, NewLayer};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateLayerBody {
    pub name: String,
    #[serde(default = "default_layer_color")]
    pub color: String,
    pub created_by: Option<Uuid>,
}

fn default_layer_color() -> String {
    "#1E88E5".to_owned()
}

#[derive(Deserialize)]
pub struct VisibilityBody {
    pub visible: bool,
}

/// `GET /api/drawings/:id/layers` — list layers, `Default` first.
pub async fn list_layers(
    State(state): State<AppState>,
    Path(drawing_id): Path<Uuid>,
) -> Result<Json<Vec<Layer>>, StatusCode> {
    let rows = layers::list_layers(&state.pool, drawing_id)
        .await
        .map_err(layer_error_to_status)?;
    Ok(Json(rows))
}

/// `POST /api/drawings/:id/layers` — create a named layer.
pub async fn create_layer(
    State(state): State<AppState>,
    Path(drawing_id): Path<Uuid>,
    Json(body): Json<CreateLayerBody>,
) -> Result<(StatusCode, Json<Layer>), StatusCode> {
    let layer = layers::create_layer(
        &state.pool,
        drawing_id,
        NewLayer { name: body.name, color: body.color, created_by: body.created_by },
    )
    .await
    .map_err(layer_error_to_status)?;

    Ok((StatusCode::CREATED, Json(layer)))
}

/// `PATCH /api/layers/:id/visibility` — show or hide a stored layer.
pub async fn set_visibility(
    State(state): State<AppState>,
    Path(layer_id): Path<Uuid>,
    Json(body): Json<VisibilityBody>,
) -> Result<Json<Layer>, StatusCode> {
    let layer = layers::set_layer_visibility(&state.pool, layer_id, body.visible)
        .await
        .map_err(layer_error_to_status)?;
    Ok(Json(layer))
}

/// `DELETE /api/layers/:id` — delete a stored layer.
pub async fn delete_layer(
    State(state): State<AppState>,
    Path(layer_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    layers::delete_layer(&state.pool, layer_id)
        .await
        .map_err(layer_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub(crate) fn layer_error_to_status(err: LayerError) -> StatusCode {
    match err {
        LayerError::NotFound(_) | LayerError::DrawingNotFound(_) => StatusCode::NOT_FOUND,
        LayerError::ReservedName(_) | LayerError::DuplicateName(_) => StatusCode::CONFLICT,
        LayerError::Database(e) => {
            tracing::error!(error = %e, "layer route database error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "layers_test.rs"]
mod tests;
