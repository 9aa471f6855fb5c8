//! Pin routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use markup::doc::{PartialPin, Pin, PinKind};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::pins::{self, NewPin, PinError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreatePinBody {
    pub kind: String,
    pub x_percent: f64,
    pub y_percent: f64,
    #[serde(default)]
    pub label: String,
    pub color: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// `GET /api/drawings/:id/pins` — list a drawing's pins.
pub async fn list_pins(
    State(state): State<AppState>,
    Path(drawing_id): Path<Uuid>,
) -> Result<Json<Vec<Pin>>, StatusCode> {
    let rows = pins::list_pins(&state.pool, drawing_id)
        .await
        .map_err(pin_error_to_status)?;
    Ok(Json(rows))
}

/// `POST /api/drawings/:id/pins` — place a pin.
pub async fn create_pin(
    State(state): State<AppState>,
    Path(drawing_id): Path<Uuid>,
    Json(body): Json<CreatePinBody>,
) -> Result<(StatusCode, Json<Pin>), StatusCode> {
    let Some(kind) = PinKind::from_str(&body.kind) else {
        return Err(StatusCode::BAD_REQUEST);
    };

    let pin = pins::create_pin(
        &state.pool,
        drawing_id,
        NewPin {
            kind,
            x_percent: body.x_percent,
            y_percent: body.y_percent,
            label: body.label,
            color: body.color,
            notes: body.notes,
        },
    )
    .await
    .map_err(pin_error_to_status)?;

    Ok((StatusCode::CREATED, Json(pin)))
}

/// `PATCH /api/pins/:id` — apply a sparse field patch.
pub async fn update_pin(
    State(state): State<AppState>,
    Path(pin_id): Path<Uuid>,
    Json(patch): Json<PartialPin>,
) -> Result<Json<Pin>, StatusCode> {
    let pin = pins::update_pin(&state.pool, pin_id, patch)
        .await
        .map_err(pin_error_to_status)?;
    Ok(Json(pin))
}

/// `DELETE /api/pins/:id` — remove a pin.
pub async fn delete_pin(
    State(state): State<AppState>,
    Path(pin_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    pins::delete_pin(&state.pool, pin_id)
        .await
        .map_err(pin_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub(crate) fn pin_error_to_status(err: PinError) -> StatusCode {
    match err {
        PinError::NotFound(_) | PinError::DrawingNotFound(_) => StatusCode::NOT_FOUND,
        PinError::OutOfRange { .. } => StatusCode::BAD_REQUEST,
        PinError::Database(e) => {
            tracing::error!(error = %e, "pin route database error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "pins_test.rs"]
mod tests;
