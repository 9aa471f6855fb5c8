//! Drawing and revision service.
//!
//! DESIGN
//! ======
//! A drawing is the logical document; revisions are its dated files. At most
//! one revision per drawing carries status `current`. Creating a new current
//! revision demotes the previous one and repoints the drawing's denormalized
//! `current_revision_id`, all in one transaction, so no window exists where a
//! drawing has two current revisions.

use markup::doc::{Drawing, DrawingStatus, Revision, RevisionStatus};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum DrawingError {
    #[error("drawing not found: {0}")]
    NotFound(Uuid),
    #[error("revision not found: {0}")]
    RevisionNotFound(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Fields accepted when registering a new drawing.
#[derive(Debug, Clone)]
pub struct NewDrawing {
    pub project_id: Uuid,
    pub file_url: String,
    pub discipline: String,
}

/// Fields accepted when uploading a new revision.
#[derive(Debug, Clone)]
pub struct NewRevision {
    pub label: String,
    pub file_url: String,
    pub file_name: String,
    pub file_size: i64,
    pub description: String,
    pub uploaded_by: Option<Uuid>,
}

type DrawingRow = (Uuid, Uuid, String, String, String, Option<Uuid>);
type RevisionRow = (Uuid, Uuid, String, String, String, i64, String, String, Option<Uuid>);

fn drawing_from_row(row: DrawingRow) -> Drawing {
    let (id, project_id, file_url, discipline, status, current_revision_id) = row;
    Drawing {
        id,
        project_id,
        file_url,
        discipline,
        status: DrawingStatus::from_str(&status).unwrap_or(DrawingStatus::Current),
        current_revision_id,
    }
}

fn revision_from_row(row: RevisionRow) -> Revision {
    let (id, drawing_id, label, file_url, file_name, file_size, description, status, uploaded_by) = row;
    Revision {
        id,
        drawing_id,
        label,
        file_url,
        file_name,
        file_size,
        description,
        status: RevisionStatus::from_str(&status).unwrap_or(RevisionStatus::Current),
        uploaded_by,
    }
}

// =============================================================================
// DRAWINGS
// =============================================================================

/// Register a new drawing.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn create_drawing(pool: &PgPool, new: NewDrawing) -> Result<Drawing, DrawingError> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO drawings (id, project_id, file_url, discipline, status) VALUES ($1, $2, $3, $4, $5)")
        .bind(id)
        .bind(new.project_id)
        .bind(&new.file_url)
        .bind(&new.discipline)
        .bind(DrawingStatus::Current.as_str())
        .execute(pool)
        .await?;

    info!(%id, project_id = %new.project_id, "drawing registered");
    Ok(Drawing {
        id,
        project_id: new.project_id,
        file_url: new.file_url,
        discipline: new.discipline,
        status: DrawingStatus::Current,
        current_revision_id: None,
    })
}

/// List drawings for a project, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_drawings(pool: &PgPool, project_id: Uuid) -> Result<Vec<Drawing>, DrawingError> {
    let rows = sqlx::query_as::<_, DrawingRow>(
        "SELECT id, project_id, file_url, discipline, status, current_revision_id
         FROM drawings
         WHERE project_id = $1
         ORDER BY created_at DESC",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(drawing_from_row).collect())
}

/// Fetch one drawing by id.
///
/// # Errors
///
/// Returns `NotFound` for unknown ids, or a database error.
pub async fn get_drawing(pool: &PgPool, drawing_id: Uuid) -> Result<Drawing, DrawingError> {
    let row = sqlx::query_as::<_, DrawingRow>(
        "SELECT id, project_id, file_url, discipline, status, current_revision_id
         FROM drawings WHERE id = $1",
    )
    .bind(drawing_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DrawingError::NotFound(drawing_id))?;

    Ok(drawing_from_row(row))
}

/// Update a drawing's lifecycle status.
///
/// # Errors
///
/// Returns `NotFound` for unknown ids, or a database error.
pub async fn set_drawing_status(
    pool: &PgPool,
    drawing_id: Uuid,
    status: DrawingStatus,
) -> Result<(), DrawingError> {
    let result = sqlx::query("UPDATE drawings SET status = $2, updated_at = now() WHERE id = $1")
        .bind(drawing_id)
        .bind(status.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DrawingError::NotFound(drawing_id));
    }
    Ok(())
}

/// Delete a drawing. Revisions, markups, pins, and layers cascade.
///
/// # Errors
///
/// Returns `NotFound` for unknown ids, or a database error.
pub async fn delete_drawing(pool: &PgPool, drawing_id: Uuid) -> Result<(), DrawingError> {
    let result = sqlx::query("DELETE FROM drawings WHERE id = $1")
        .bind(drawing_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DrawingError::NotFound(drawing_id));
    }
    Ok(())
}

// =============================================================================
// REVISIONS
// =============================================================================

/// List a drawing's revisions, newest first.
///
/// # Errors
///
/// Returns `NotFound` if the drawing doesn't exist, or a database error.
pub async fn list_revisions(pool: &PgPool, drawing_id: Uuid) -> Result<Vec<Revision>, DrawingError> {
    ensure_drawing_exists(pool, drawing_id).await?;

    let rows = sqlx::query_as::<_, RevisionRow>(
        "SELECT id, drawing_id, label, file_url, file_name, file_size, description, status, uploaded_by
         FROM revisions
         WHERE drawing_id = $1
         ORDER BY created_at DESC",
    )
    .bind(drawing_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(revision_from_row).collect())
}

/// Create a new current revision for a drawing.
///
/// Demotes the previous current revision and repoints the drawing's
/// `current_revision_id` in the same transaction.
///
/// # Errors
///
/// Returns `NotFound` if the drawing doesn't exist, or a database error.
pub async fn create_revision(
    pool: &PgPool,
    drawing_id: Uuid,
    new: NewRevision,
) -> Result<Revision, DrawingError> {
    ensure_drawing_exists(pool, drawing_id).await?;

    let id = Uuid::new_v4();
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE revisions SET status = $2 WHERE drawing_id = $1 AND status = $3")
        .bind(drawing_id)
        .bind(RevisionStatus::Superseded.as_str())
        .bind(RevisionStatus::Current.as_str())
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO revisions (id, drawing_id, label, file_url, file_name, file_size, description, status, uploaded_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(id)
    .bind(drawing_id)
    .bind(&new.label)
    .bind(&new.file_url)
    .bind(&new.file_name)
    .bind(new.file_size)
    .bind(&new.description)
    .bind(RevisionStatus::Current.as_str())
    .bind(new.uploaded_by)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE drawings SET current_revision_id = $2, file_url = $3, updated_at = now() WHERE id = $1")
        .bind(drawing_id)
        .bind(id)
        .bind(&new.file_url)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!(%drawing_id, revision_id = %id, label = %new.label, "revision created");

    Ok(Revision {
        id,
        drawing_id,
        label: new.label,
        file_url: new.file_url,
        file_name: new.file_name,
        file_size: new.file_size,
        description: new.description,
        status: RevisionStatus::Current,
        uploaded_by: new.uploaded_by,
    })
}

/// Fetch one revision by id.
///
/// # Errors
///
/// Returns `RevisionNotFound` for unknown ids, or a database error.
pub async fn get_revision(pool: &PgPool, revision_id: Uuid) -> Result<Revision, DrawingError> {
    let row = sqlx::query_as::<_, RevisionRow>(
        "SELECT id, drawing_id, label, file_url, file_name, file_size, description, status, uploaded_by
         FROM revisions WHERE id = $1",
    )
    .bind(revision_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DrawingError::RevisionNotFound(revision_id))?;

    Ok(revision_from_row(row))
}

pub(crate) async fn ensure_drawing_exists(pool: &PgPool, drawing_id: Uuid) -> Result<(), DrawingError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM drawings WHERE id = $1)")
        .bind(drawing_id)
        .fetch_one(pool)
        .await?;
    if !exists {
        return Err(DrawingError::NotFound(drawing_id));
    }
    Ok(())
}

#[cfg(test)]
#[path = "drawings_test.rs"]
mod tests;
