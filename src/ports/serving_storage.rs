//! ServingStorage port - Durable slot for the current-serving snapshot.
//!
//! One whole-record slot per counter session: writes replace the snapshot
//! completely, so a reader always sees a consistent, complete ticket record
//! or none at all.

use async_trait::async_trait;

use crate::domain::foundation::CounterId;
use crate::domain::serving::CurrentServingTicket;

/// Errors that can occur during snapshot storage operations.
#[derive(Debug, thiserror::Error)]
pub enum ServingStorageError {
    #[error("Failed to serialize snapshot: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize snapshot: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting and recovering the current-serving snapshot.
#[async_trait]
pub trait ServingStorage: Send + Sync {
    /// Replace the counter's snapshot with the given ticket.
    async fn save(
        &self,
        counter: CounterId,
        ticket: &CurrentServingTicket,
    ) -> Result<(), ServingStorageError>;

    /// Read the counter's snapshot, if one exists.
    ///
    /// Returns `None` rather than an error when the slot is empty; an
    /// empty slot is the normal state for a fresh session.
    async fn load(
        &self,
        counter: CounterId,
    ) -> Result<Option<CurrentServingTicket>, ServingStorageError>;

    /// Remove the counter's snapshot. Clearing an empty slot is a no-op.
    async fn clear(&self, counter: CounterId) -> Result<(), ServingStorageError>;
}
