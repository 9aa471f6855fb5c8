//! Drawing file upload and download routes.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::storage::{StorageError, storage_path};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UploadQuery {
    pub project_id: Uuid,
    pub set_name: String,
    pub revision_label: String,
    pub file_name: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub path: String,
}

/// `PUT /api/files?project_id=&set_name=&revision_label=&file_name=` —
/// store the raw body and return the public URL plus the storage path.
pub async fn upload_file(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadResponse>), StatusCode> {
    if body.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let path = storage_path(query.project_id, &query.set_name, &query.revision_label, &query.file_name)
        .map_err(storage_error_to_status)?;

    state.files.save(&path, &body).await.map_err(storage_error_to_status)?;

    let url = state.file_url(&path);
    Ok((StatusCode::CREATED, Json(UploadResponse { url, path })))
}

/// `GET /files/*path` — serve a stored drawing file.
pub async fn download_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Vec<u8>, StatusCode> {
    state.files.load(&path).await.map_err(storage_error_to_status)
}

pub(crate) fn storage_error_to_status(err: StorageError) -> StatusCode {
    match err {
        StorageError::NotFound(_) => StatusCode::NOT_FOUND,
        StorageError::InvalidComponent(_) => StatusCode::BAD_REQUEST,
        StorageError::Io(e) => {
            tracing::error!(error = %e, "file route io error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
