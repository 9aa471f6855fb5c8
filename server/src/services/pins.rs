//! Pin service.
//!
//! DESIGN
//! ======
//! Pins are status-tracked location markers anchored by image percentage, so
//! they survive revision swaps without coordinate fixups. Unlike markups they
//! are mutable: label, status, color, and notes accept sparse patches. The
//! anchor itself is placement-only and never patched.

use markup::doc::{PartialPin, Pin, PinKind, PinStatus};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::services::drawings;

#[derive(Debug, thiserror::Error)]
pub enum PinError {
    #[error("pin not found: {0}")]
    NotFound(Uuid),
    #[error("drawing not found: {0}")]
    DrawingNotFound(Uuid),
    #[error("pin anchor out of range: ({x}%, {y}%)")]
    OutOfRange { x: f64, y: f64 },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<drawings::DrawingError> for PinError {
    fn from(err: drawings::DrawingError) -> Self {
        match err {
            drawings::DrawingError::NotFound(id) | drawings::DrawingError::RevisionNotFound(id) => {
                Self::DrawingNotFound(id)
            }
            drawings::DrawingError::Database(e) => Self::Database(e),
        }
    }
}

/// Fields accepted when placing a pin.
#[derive(Debug, Clone)]
pub struct NewPin {
    pub kind: PinKind,
    pub x_percent: f64,
    pub y_percent: f64,
    pub label: String,
    /// Marker color; the kind's default when absent.
    pub color: Option<String>,
    pub notes: String,
}

type PinRow = (Uuid, Uuid, String, f64, f64, String, String, String, String);

fn pin_from_row(row: PinRow) -> Pin {
    let (id, drawing_id, kind, x_percent, y_percent, label, status, color, notes) = row;
    Pin {
        id,
        drawing_id,
        // Rows written by this build always round-trip; anything else falls
        // back rather than poisoning the whole list.
        kind: PinKind::from_str(&kind).unwrap_or(PinKind::Observation),
        x_percent,
        y_percent,
        label,
        status: PinStatus::from_str(&status).unwrap_or(PinStatus::Open),
        color,
        notes,
    }
}

fn anchor_in_range(x: f64, y: f64) -> bool {
    (0.0..=100.0).contains(&x) && (0.0..=100.0).contains(&y)
}

/// List a drawing's pins, oldest first.
///
/// # Errors
///
/// Returns `DrawingNotFound` for unknown drawings, or a database error.
pub async fn list_pins(pool: &PgPool, drawing_id: Uuid) -> Result<Vec<Pin>, PinError> {
    drawings::ensure_drawing_exists(pool, drawing_id).await?;

    let rows = sqlx::query_as::<_, PinRow>(
        "SELECT id, drawing_id, kind, x_percent, y_percent, label, status, color, notes
         FROM pins
         WHERE drawing_id = $1
         ORDER BY created_at ASC, id ASC",
    )
    .bind(drawing_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(pin_from_row).collect())
}

/// Place a pin. New pins always start `open`.
///
/// # Errors
///
/// Returns `OutOfRange` for anchors outside `[0, 100]`, `DrawingNotFound`
/// for unknown drawings, or a database error.
pub async fn create_pin(pool: &PgPool, drawing_id: Uuid, new: NewPin) -> Result<Pin, PinError> {
    if !anchor_in_range(new.x_percent, new.y_percent) {
        return Err(PinError::OutOfRange { x: new.x_percent, y: new.y_percent });
    }
    drawings::ensure_drawing_exists(pool, drawing_id).await?;

    let id = Uuid::new_v4();
    let color = new.color.unwrap_or_else(|| new.kind.default_color().to_owned());
    sqlx::query(
        "INSERT INTO pins (id, drawing_id, kind, x_percent, y_percent, label, status, color, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(id)
    .bind(drawing_id)
    .bind(new.kind.as_str())
    .bind(new.x_percent)
    .bind(new.y_percent)
    .bind(&new.label)
    .bind(PinStatus::Open.as_str())
    .bind(&color)
    .bind(&new.notes)
    .execute(pool)
    .await?;

    info!(%drawing_id, pin_id = %id, kind = new.kind.as_str(), "pin placed");
    Ok(Pin {
        id,
        drawing_id,
        kind: new.kind,
        x_percent: new.x_percent,
        y_percent: new.y_percent,
        label: new.label,
        status: PinStatus::Open,
        color,
        notes: new.notes,
    })
}

/// Apply a sparse patch to a pin and return the updated row. Absent fields
/// are left untouched; the percent anchor is not patchable.
///
/// # Errors
///
/// Returns `NotFound` for unknown ids, or a database error.
pub async fn update_pin(pool: &PgPool, pin_id: Uuid, patch: PartialPin) -> Result<Pin, PinError> {
    let row = sqlx::query_as::<_, PinRow>(
        "UPDATE pins
         SET label = COALESCE($2, label),
             status = COALESCE($3, status),
             color = COALESCE($4, color),
             notes = COALESCE($5, notes),
             updated_at = NOW()
         WHERE id = $1
         RETURNING id, drawing_id, kind, x_percent, y_percent, label, status, color, notes",
    )
    .bind(pin_id)
    .bind(patch.label)
    .bind(patch.status.map(PinStatus::as_str))
    .bind(patch.color)
    .bind(patch.notes)
    .fetch_optional(pool)
    .await?
    .ok_or(PinError::NotFound(pin_id))?;

    Ok(pin_from_row(row))
}

/// Delete one pin.
///
/// # Errors
///
/// Returns `NotFound` for unknown ids, or a database error.
pub async fn delete_pin(pool: &PgPool, pin_id: Uuid) -> Result<(), PinError> {
    let result = sqlx::query("DELETE FROM pins WHERE id = $1")
        .bind(pin_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(PinError::NotFound(pin_id));
    }
    info!(%pin_id, "pin deleted");
    Ok(())
}

#[cfg(test)]
#[path = "pins_test.rs"]
mod tests;
