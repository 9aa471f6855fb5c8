//! File storage behind a trait seam.
//!
//! DESIGN
//! ======
//! Drawing files live outside Postgres under a deterministic path:
//! `{project_id}/{set_name}/{revision_label}/{file_name}`. The gateway only
//! ever sees the [`FileStore`] trait, so the local-disk store can be swapped
//! for an object store without touching the routes. Path components come
//! from request input and are validated before they reach the filesystem.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("invalid path component: {0:?}")]
    InvalidComponent(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where drawing files are saved and read back. Paths are relative,
/// forward-slash separated, and pre-validated by [`storage_path`].
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn save(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError>;
    async fn load(&self, path: &str) -> Result<Vec<u8>, StorageError>;
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

/// Reject components that are empty or could escape the storage root.
fn validate_component(component: &str) -> Result<(), StorageError> {
    let trimmed = component.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains('/')
        || trimmed.contains('\\')
        || trimmed.contains('\0')
    {
        return Err(StorageError::InvalidComponent(component.to_owned()));
    }
    Ok(())
}

/// Build the canonical storage path for an uploaded drawing file.
///
/// # Errors
///
/// Returns `InvalidComponent` when any segment is empty or contains a path
/// separator or traversal sequence.
pub fn storage_path(
    project_id: Uuid,
    set_name: &str,
    revision_label: &str,
    file_name: &str,
) -> Result<String, StorageError> {
    for component in [set_name, revision_label, file_name] {
        validate_component(component)?;
    }
    Ok(format!("{project_id}/{}/{}/{}", set_name.trim(), revision_label.trim(), file_name.trim()))
}

/// Disk-backed store rooted at a single directory.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let mut resolved = self.root.clone();
        for component in path.split('/') {
            validate_component(component)?;
            resolved.push(component);
        }
        Ok(resolved)
    }
}

#[async_trait]
impl FileStore for LocalStore {
    async fn save(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&target, bytes).await?;
        info!(%path, size = bytes.len(), "file saved");
        Ok(())
    }

    async fn load(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let target = self.resolve(path)?;
        match fs::read(&target).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        match fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
