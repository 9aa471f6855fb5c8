//! Drawing and revision routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use markup::doc::{Drawing, DrawingStatus, Revision};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::drawings::{self, DrawingError, NewDrawing, NewRevision};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListDrawingsQuery {
    pub project_id: Uuid,
}

#[derive(Deserialize)]
pub struct CreateDrawingBody {
    pub project_id: Uuid,
    #[serde(default)]
    pub file_url: String,
    pub discipline: String,
}

#[derive(Deserialize)]
pub struct UpdateDrawingBody {
    pub status: String,
}

#[derive(Deserialize)]
pub struct CreateRevisionBody {
    pub label: String,
    pub file_url: String,
    pub file_name: String,
    pub file_size: i64,
    #[serde(default)]
    pub description: String,
    pub uploaded_by: Option<Uuid>,
}

/// `GET /api/drawings?project_id=` — list a project's drawings.
pub async fn list_drawings(
    State(state): State<AppState>,
    Query(query): Query<ListDrawingsQuery>,
) -> Result<Json<Vec<Drawing>>, StatusCode> {
    let rows = drawings::list_drawings(&state.pool, query.project_id)
        .await
        .map_err(drawing_error_to_status)?;
    Ok(Json(rows))
}

/// `POST /api/drawings` — register a drawing.
pub async fn create_drawing(
    State(state): State<AppState>,
    Json(body): Json<CreateDrawingBody>,
) -> Result<(StatusCode, Json<Drawing>), StatusCode> {
    let drawing = drawings::create_drawing(
        &state.pool,
        NewDrawing {
            project_id: body.project_id,
            file_url: body.file_url,
            discipline: body.discipline,
        },
    )
    .await
    .map_err(drawing_error_to_status)?;

    Ok((StatusCode::CREATED, Json(drawing)))
}

/// `GET /api/drawings/:id` — fetch one drawing.
pub async fn get_drawing(
    State(state): State<AppState>,
    Path(drawing_id): Path<Uuid>,
) -> Result<Json<Drawing>, StatusCode> {
    let drawing = drawings::get_drawing(&state.pool, drawing_id)
        .await
        .map_err(drawing_error_to_status)?;
    Ok(Json(drawing))
}

/// `PATCH /api/drawings/:id` — set lifecycle status.
pub async fn update_drawing(
    State(state): State<AppState>,
    Path(drawing_id): Path<Uuid>,
    Json(body): Json<UpdateDrawingBody>,
) -> Result<Json<Drawing>, StatusCode> {
    let Some(status) = DrawingStatus::from_str(&body.status) else {
        return Err(StatusCode::BAD_REQUEST);
    };

    drawings::set_drawing_status(&state.pool, drawing_id, status)
        .await
        .map_err(drawing_error_to_status)?;

    let drawing = drawings::get_drawing(&state.pool, drawing_id)
        .await
        .map_err(drawing_error_to_status)?;
    Ok(Json(drawing))
}

/// `DELETE /api/drawings/:id` — delete a drawing and everything under it.
pub async fn delete_drawing(
    State(state): State<AppState>,
    Path(drawing_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    drawings::delete_drawing(&state.pool, drawing_id)
        .await
        .map_err(drawing_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `GET /api/drawings/:id/revisions` — revision history, newest first.
pub async fn list_revisions(
    State(state): State<AppState>,
    Path(drawing_id): Path<Uuid>,
) -> Result<Json<Vec<Revision>>, StatusCode> {
    let rows = drawings::list_revisions(&state.pool, drawing_id)
        .await
        .map_err(drawing_error_to_status)?;
    Ok(Json(rows))
}

/// `GET /api/revisions/:id` — fetch one revision.
pub async fn get_revision(
    State(state): State<AppState>,
    Path(revision_id): Path<Uuid>,
) -> Result<Json<Revision>, StatusCode> {
    let revision = drawings::get_revision(&state.pool, revision_id)
        .await
        .map_err(drawing_error_to_status)?;
    Ok(Json(revision))
}

/// `POST /api/drawings/:id/revisions` — upload a revision; the previous
/// current revision is demoted in the same transaction.
pub async fn create_revision(
    State(state): State<AppState>,
    Path(drawing_id): Path<Uuid>,
    Json(body): Json<CreateRevisionBody>,
) -> Result<(StatusCode, Json<Revision>), StatusCode> {
    if body.label.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let revision = drawings::create_revision(
        &state.pool,
        drawing_id,
        NewRevision {
            label: body.label,
            file_url: body.file_url,
            file_name: body.file_name,
            file_size: body.file_size,
            description: body.description,
            uploaded_by: body.uploaded_by,
        },
    )
    .await
    .map_err(drawing_error_to_status)?;

    Ok((StatusCode::CREATED, Json(revision)))
}

pub(crate) fn drawing_error_to_status(err: DrawingError) -> StatusCode {
    match err {
        DrawingError::NotFound(_) | DrawingError::RevisionNotFound(_) => StatusCode::NOT_FOUND,
        DrawingError::Database(e) => {
            tracing::error!(error = %e, "drawing route database error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "drawings_test.rs"]
mod tests;
