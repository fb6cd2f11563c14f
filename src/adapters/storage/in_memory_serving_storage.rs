//! In-Memory Serving Storage Adapter
//!
//! Stores the serving snapshot in memory. Useful for testing and
//! development; nothing survives a restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::CounterId;
use crate::domain::serving::CurrentServingTicket;
use crate::ports::{ServingStorage, ServingStorageError};

/// In-memory storage for serving snapshots
#[derive(Debug, Clone, Default)]
pub struct InMemoryServingStorage {
    slots: Arc<RwLock<HashMap<CounterId, CurrentServingTicket>>>,
}

impl InMemoryServingStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots (useful for tests)
    pub async fn slot_count(&self) -> usize {
        self.slots.read().await.len()
    }
}

#[async_trait]
impl ServingStorage for InMemoryServingStorage {
    async fn save(
        &self,
        counter: CounterId,
        ticket: &CurrentServingTicket,
    ) -> Result<(), ServingStorageError> {
        self.slots.write().await.insert(counter, ticket.clone());
        Ok(())
    }

    async fn load(
        &self,
        counter: CounterId,
    ) -> Result<Option<CurrentServingTicket>, ServingStorageError> {
        Ok(self.slots.read().await.get(&counter).cloned())
    }

    async fn clear(&self, counter: CounterId) -> Result<(), ServingStorageError> {
        self.slots.write().await.remove(&counter);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TicketNumber;
    use crate::domain::serving::TicketStatus;

    fn ticket(number: &str) -> CurrentServingTicket {
        CurrentServingTicket {
            ticket_number: TicketNumber::new(number).unwrap(),
            full_name: "Tran Thi B".to_string(),
            status: TicketStatus::Processing,
            called_at: None,
        }
    }

    #[tokio::test]
    async fn save_load_clear_cycle() {
        let storage = InMemoryServingStorage::new();
        let counter = CounterId::new();

        assert!(storage.load(counter).await.unwrap().is_none());

        storage.save(counter, &ticket("A015")).await.unwrap();
        assert_eq!(
            storage
                .load(counter)
                .await
                .unwrap()
                .unwrap()
                .ticket_number
                .as_str(),
            "A015"
        );
        assert_eq!(storage.slot_count().await, 1);

        storage.clear(counter).await.unwrap();
        assert!(storage.load(counter).await.unwrap().is_none());
        assert_eq!(storage.slot_count().await, 0);
    }

    #[tokio::test]
    async fn slots_are_isolated_per_counter() {
        let storage = InMemoryServingStorage::new();
        let counter_a = CounterId::new();
        let counter_b = CounterId::new();

        storage.save(counter_a, &ticket("A015")).await.unwrap();
        assert!(storage.load(counter_b).await.unwrap().is_none());
    }
}
