//! File-based Serving Storage Adapter
//!
//! Stores the current-serving snapshot as one YAML file per counter
//! session under a base directory. Writes replace the file whole, so a
//! snapshot read back is always a complete record or absent.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::CounterId;
use crate::domain::serving::CurrentServingTicket;
use crate::ports::{ServingStorage, ServingStorageError};

/// File-based storage for the current-serving snapshot
#[derive(Debug, Clone)]
pub struct FileServingStorage {
    base_path: PathBuf,
}

impl FileServingStorage {
    /// Create a new file storage with a base directory
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the snapshot file path for a counter
    fn snapshot_path(&self, counter: CounterId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", counter))
    }

    /// Ensure the base directory exists
    async fn ensure_dir(&self) -> Result<(), ServingStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| ServingStorageError::IoError(e.to_string()))
    }
}

#[async_trait]
impl ServingStorage for FileServingStorage {
    async fn save(
        &self,
        counter: CounterId,
        ticket: &CurrentServingTicket,
    ) -> Result<(), ServingStorageError> {
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(ticket)
            .map_err(|e| ServingStorageError::SerializationFailed(e.to_string()))?;

        fs::write(self.snapshot_path(counter), yaml)
            .await
            .map_err(|e| ServingStorageError::IoError(e.to_string()))?;

        Ok(())
    }

    async fn load(
        &self,
        counter: CounterId,
    ) -> Result<Option<CurrentServingTicket>, ServingStorageError> {
        let path = self.snapshot_path(counter);

        if !path.exists() {
            return Ok(None);
        }

        let yaml = fs::read_to_string(&path)
            .await
            .map_err(|e| ServingStorageError::IoError(e.to_string()))?;

        let ticket = serde_yaml::from_str(&yaml)
            .map_err(|e| ServingStorageError::DeserializationFailed(e.to_string()))?;

        Ok(Some(ticket))
    }

    async fn clear(&self, counter: CounterId) -> Result<(), ServingStorageError> {
        let path = self.snapshot_path(counter);

        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| ServingStorageError::IoError(e.to_string()))?;
        }

        Ok(())
    }
}
