//! Markup service.
//!
//! DESIGN
//! ======
//! Markups are write-once vector annotations scoped to a drawing revision.
//! The gateway stores the open `kind`/`data` pair verbatim; it never
//! interprets payload geometry. Corrections are delete-and-redraw, so the
//! only mutations are insert and delete (single or batch). Last write wins;
//! there is no concurrency token.

use markup::doc::Markup;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::services::drawings;

#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    #[error("markup not found: {0}")]
    NotFound(Uuid),
    #[error("drawing not found: {0}")]
    DrawingNotFound(Uuid),
    #[error("markup kind must not be empty")]
    EmptyKind,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<drawings::DrawingError> for MarkupError {
    fn from(err: drawings::DrawingError) -> Self {
        match err {
            drawings::DrawingError::NotFound(id) | drawings::DrawingError::RevisionNotFound(id) => {
                Self::DrawingNotFound(id)
            }
            drawings::DrawingError::Database(e) => Self::Database(e),
        }
    }
}

/// Fields accepted when persisting a markup.
#[derive(Debug, Clone)]
pub struct NewMarkup {
    pub revision_id: Option<Uuid>,
    pub kind: String,
    pub data: serde_json::Value,
    pub color: String,
    pub layer: String,
    pub created_by: Option<Uuid>,
}

type MarkupRow = (Uuid, Uuid, Option<Uuid>, String, serde_json::Value, String, String, Option<Uuid>);

fn markup_from_row(row: MarkupRow) -> Markup {
    let (id, drawing_id, revision_id, kind, data, color, layer, created_by) = row;
    Markup { id, drawing_id, revision_id, kind, data, color, layer, created_by }
}

/// List markups for a drawing, optionally narrowed to one revision.
///
/// # Errors
///
/// Returns `DrawingNotFound` for unknown drawings, or a database error.
pub async fn list_markups(
    pool: &PgPool,
    drawing_id: Uuid,
    revision_id: Option<Uuid>,
) -> Result<Vec<Markup>, MarkupError> {
    drawings::ensure_drawing_exists(pool, drawing_id).await?;

    let rows = match revision_id {
        Some(revision_id) => {
            sqlx::query_as::<_, MarkupRow>(
                "SELECT id, drawing_id, revision_id, kind, data, color, layer, created_by
                 FROM markups
                 WHERE drawing_id = $1 AND revision_id = $2
                 ORDER BY created_at ASC, id ASC",
            )
            .bind(drawing_id)
            .bind(revision_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, MarkupRow>(
                "SELECT id, drawing_id, revision_id, kind, data, color, layer, created_by
                 FROM markups
                 WHERE drawing_id = $1
                 ORDER BY created_at ASC, id ASC",
            )
            .bind(drawing_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows.into_iter().map(markup_from_row).collect())
}

/// Persist a markup under a fresh server-assigned id.
///
/// The `kind` string is open: kinds this build doesn't know are stored as-is
/// so newer clients can still read them back.
///
/// # Errors
///
/// Returns `EmptyKind` for a blank kind, `DrawingNotFound` for unknown
/// drawings, or a database error.
pub async fn create_markup(pool: &PgPool, drawing_id: Uuid, new: NewMarkup) -> Result<Markup, MarkupError> {
    if new.kind.trim().is_empty() {
        return Err(MarkupError::EmptyKind);
    }
    drawings::ensure_drawing_exists(pool, drawing_id).await?;

    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO markups (id, drawing_id, revision_id, kind, data, color, layer, created_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(id)
    .bind(drawing_id)
    .bind(new.revision_id)
    .bind(&new.kind)
    .bind(&new.data)
    .bind(&new.color)
    .bind(&new.layer)
    .bind(new.created_by)
    .execute(pool)
    .await?;

    info!(%drawing_id, markup_id = %id, kind = %new.kind, "markup persisted");
    Ok(Markup {
        id,
        drawing_id,
        revision_id: new.revision_id,
        kind: new.kind,
        data: new.data,
        color: new.color,
        layer: new.layer,
        created_by: new.created_by,
    })
}

/// Delete one markup.
///
/// # Errors
///
/// Returns `NotFound` for unknown ids, or a database error.
pub async fn delete_markup(pool: &PgPool, markup_id: Uuid) -> Result<(), MarkupError> {
    let result = sqlx::query("DELETE FROM markups WHERE id = $1")
        .bind(markup_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MarkupError::NotFound(markup_id));
    }
    Ok(())
}

/// Delete a batch of markups, returning how many existed. Ids already gone
/// are skipped rather than failing the batch.
///
/// # Errors
///
/// Returns a database error if the delete fails.
pub async fn delete_markups(pool: &PgPool, ids: &[Uuid]) -> Result<u64, MarkupError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result = sqlx::query("DELETE FROM markups WHERE id = ANY($1)")
        .bind(ids)
        .execute(pool)
        .await?;

    info!(requested = ids.len(), deleted = result.rows_affected(), "markup batch delete");
    Ok(result.rows_affected())
}

#[cfg(test)]
#[path = "markups_test.rs"]
mod tests;
