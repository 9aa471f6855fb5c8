//! Layer service.
//!
//! DESIGN
//! ======
//! Layers are named visibility groups for markups. The `Default` layer is
//! synthetic: it is never stored, every listing starts with it, and it can
//! neither be created nor deleted. Stored layers are unique by name within a
//! drawing.

use markup::doc::{DEFAULT_LAYER, Layer};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::services::drawings;

#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    #[error("layer not found: {0}")]
    NotFound(Uuid),
    #[error("drawing not found: {0}")]
    DrawingNotFound(Uuid),
    #[error("layer name is reserved: {0}")]
    ReservedName(String),
    #[error("layer already exists: {0}")]
    DuplicateName(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<drawings::DrawingError> for LayerError {
    fn from(err: drawings::DrawingError) -> Self {
        match err {
            drawings::DrawingError::NotFound(id) | drawings::DrawingError::RevisionNotFound(id) => {
                Self::DrawingNotFound(id)
            }
            drawings::DrawingError::Database(e) => Self::Database(e),
        }
    }
}

/// Fields accepted when creating a layer.
#[derive(Debug, Clone)]
pub struct NewLayer {
    pub name: String,
    pub color: String,
    pub created_by: Option<Uuid>,
}

type LayerRow = (Uuid, Uuid, String, String, bool, Option<Uuid>);

fn layer_from_row(row: LayerRow) -> Layer {
    let (id, drawing_id, name, color, visible, created_by) = row;
    Layer { id, drawing_id, name, color, visible, created_by }
}

/// The synthetic always-first layer every drawing has.
fn default_layer(drawing_id: Uuid) -> Layer {
    Layer {
        id: Uuid::nil(),
        drawing_id,
        name: DEFAULT_LAYER.to_owned(),
        color: "#1E88E5".to_owned(),
        visible: true,
        created_by: None,
    }
}

/// List a drawing's layers. The synthetic `Default` layer is always first;
/// stored layers follow in name order.
///
/// # Errors
///
/// Returns `DrawingNotFound` for unknown drawings, or a database error.
pub async fn list_layers(pool: &PgPool, drawing_id: Uuid) -> Result<Vec<Layer>, LayerError> {
    drawings::ensure_drawing_exists(pool, drawing_id).await?;

    let rows = sqlx::query_as::<_, LayerRow>(
        "SELECT id, drawing_id, name, color, visible, created_by
         FROM layers
         WHERE drawing_id = $1
         ORDER BY name ASC",
    )
    .bind(drawing_id)
    .fetch_all(pool)
    .await?;

    let mut layers = vec![default_layer(drawing_id)];
    layers.extend(rows.into_iter().map(layer_from_row));
    Ok(layers)
}

/// Create a named layer, visible by default.
///
/// # Errors
///
/// Returns `ReservedName` for the `Default` name, `DuplicateName` when the
/// drawing already has a layer with that name, `DrawingNotFound` for unknown
/// drawings, or a database error.
pub async fn create_layer(pool: &PgPool, drawing_id: Uuid, new: NewLayer) -> Result<Layer, LayerError> {
    let name = new.name.trim().to_owned();
    if name == DEFAULT_LAYER {
        return Err(LayerError::ReservedName(name));
    }
    drawings::ensure_drawing_exists(pool, drawing_id).await?;

    let id = Uuid::new_v4();
    let result = sqlx::query(
        "INSERT INTO layers (id, drawing_id, name, color, visible, created_by)
         VALUES ($1, $2, $3, $4, TRUE, $5)
         ON CONFLICT (drawing_id, name) DO NOTHING",
    )
    .bind(id)
    .bind(drawing_id)
    .bind(&name)
    .bind(&new.color)
    .bind(new.created_by)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(LayerError::DuplicateName(name));
    }

    info!(%drawing_id, layer_id = %id, %name, "layer created");
    Ok(Layer { id, drawing_id, name, color: new.color, visible: true, created_by: new.created_by })
}

/// Set a stored layer's visibility flag and return the updated row.
///
/// The synthetic `Default` layer is always visible and has no stored row, so
/// its nil id resolves to `NotFound` here.
///
/// # Errors
///
/// Returns `NotFound` for unknown ids, or a database error.
pub async fn set_layer_visibility(pool: &PgPool, layer_id: Uuid, visible: bool) -> Result<Layer, LayerError> {
    let row = sqlx::query_as::<_, LayerRow>(
        "UPDATE layers SET visible = $2
         WHERE id = $1
         RETURNING id, drawing_id, name, color, visible, created_by",
    )
    .bind(layer_id)
    .bind(visible)
    .fetch_optional(pool)
    .await?
    .ok_or(LayerError::NotFound(layer_id))?;

    Ok(layer_from_row(row))
}

/// Delete a stored layer. Markups keep their layer name; they simply render
/// again once no hidden layer claims it.
///
/// # Errors
///
/// Returns `NotFound` for unknown ids, or a database error.
pub async fn delete_layer(pool: &PgPool, layer_id: Uuid) -> Result<(), LayerError> {
    let result = sqlx::query("DELETE FROM layers WHERE id = $1")
        .bind(layer_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(LayerError::NotFound(layer_id));
    }
    info!(%layer_id, "layer deleted");
    Ok(())
}

#[cfg(test)]
#[path = "layers_test.rs"]
mod tests;
