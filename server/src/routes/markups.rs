//! Markup routes.
//!
//! DESIGN
//! ======
//! The gateway treats markup geometry as opaque: `kind` and `data` pass
//! through to storage unchanged so newer clients can ship new shapes without
//! a server deploy. Deletes come singly or as a batch, matching the client's
//! multi-select erase.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use markup::doc::{DEFAULT_LAYER, Markup};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::markups::{self, MarkupError, NewMarkup};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListMarkupsQuery {
    pub revision_id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct CreateMarkupBody {
    pub revision_id: Option<Uuid>,
    pub kind: String,
    pub data: serde_json::Value,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_layer")]
    pub layer: String,
    pub created_by: Option<Uuid>,
}

fn default_color() -> String {
    "#D32F2F".to_owned()
}

fn default_layer() -> String {
    DEFAULT_LAYER.to_owned()
}

#[derive(Deserialize)]
pub struct BatchDeleteBody {
    pub ids: Vec<Uuid>,
}

/// `GET /api/drawings/:id/markups?revision_id=` — list markups, optionally
/// scoped to one revision.
pub async fn list_markups(
    State(state): State<AppState>,
    Path(drawing_id): Path<Uuid>,
    Query(query): Query<ListMarkupsQuery>,
) -> Result<Json<Vec<Markup>>, StatusCode> {
    let rows = markups::list_markups(&state.pool, drawing_id, query.revision_id)
        .await
        .map_err(markup_error_to_status)?;
    Ok(Json(rows))
}

/// `POST /api/drawings/:id/markups` — persist a markup.
pub async fn create_markup(
    State(state): State<AppState>,
    Path(drawing_id): Path<Uuid>,
    Json(body): Json<CreateMarkupBody>,
) -> Result<(StatusCode, Json<Markup>), StatusCode> {
    let markup = markups::create_markup(
        &state.pool,
        drawing_id,
        NewMarkup {
            revision_id: body.revision_id,
            kind: body.kind,
            data: body.data,
            color: body.color,
            layer: body.layer,
            created_by: body.created_by,
        },
    )
    .await
    .map_err(markup_error_to_status)?;

    Ok((StatusCode::CREATED, Json(markup)))
}

/// `DELETE /api/markups/:id` — delete one markup.
pub async fn delete_markup(
    State(state): State<AppState>,
    Path(markup_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    markups::delete_markup(&state.pool, markup_id)
        .await
        .map_err(markup_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /api/markups/batch-delete` — delete a multi-select batch. Ids
/// already gone are skipped; the response reports how many existed.
pub async fn batch_delete_markups(
    State(state): State<AppState>,
    Json(body): Json<BatchDeleteBody>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let deleted = markups::delete_markups(&state.pool, &body.ids)
        .await
        .map_err(markup_error_to_status)?;
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

pub(crate) fn markup_error_to_status(err: MarkupError) -> StatusCode {
    match err {
        MarkupError::NotFound(_) | MarkupError::DrawingNotFound(_) => StatusCode::NOT_FOUND,
        MarkupError::EmptyKind => StatusCode::BAD_REQUEST,
        MarkupError::Database(e) => {
            tracing::error!(error = %e, "markup route database error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "markups_test.rs"]
mod tests;
