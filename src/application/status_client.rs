//! QueueStatusClient - Point-in-time queue metrics for a service group.

use std::sync::Arc;

use crate::domain::foundation::ServiceGroupId;
use crate::domain::queue::QueueStatus;
use crate::ports::{BackendError, QueueBackend};

/// Fetches aggregate queue metrics for a selected service group.
///
/// Pure request/response: no retry, no caching, no state. The caller
/// decides when to poll and what to do on failure.
pub struct QueueStatusClient {
    backend: Arc<dyn QueueBackend>,
}

impl QueueStatusClient {
    pub fn new(backend: Arc<dyn QueueBackend>) -> Self {
        Self { backend }
    }

    /// Fetch the freshest QueueStatus the backend knows for the group.
    pub async fn fetch_status(
        &self,
        group: &ServiceGroupId,
    ) -> Result<QueueStatus, BackendError> {
        self.backend.queue_status(group).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TicketNumber;
    use crate::domain::serving::{TicketDetail, TicketStatus};
    use async_trait::async_trait;

    struct FixedBackend {
        status: QueueStatus,
    }

    #[async_trait]
    impl QueueBackend for FixedBackend {
        async fn call_next(&self, _: &ServiceGroupId) -> Result<TicketNumber, BackendError> {
            unimplemented!("not used in this test")
        }

        async fn ticket_detail(&self, _: &TicketNumber) -> Result<TicketDetail, BackendError> {
            unimplemented!("not used in this test")
        }

        async fn update_status(
            &self,
            _: &TicketNumber,
            _: TicketStatus,
        ) -> Result<(), BackendError> {
            unimplemented!("not used in this test")
        }

        async fn queue_status(&self, _: &ServiceGroupId) -> Result<QueueStatus, BackendError> {
            Ok(self.status.clone())
        }
    }

    #[tokio::test]
    async fn fetch_status_returns_backend_snapshot() {
        let client = QueueStatusClient::new(Arc::new(FixedBackend {
            status: QueueStatus {
                queue_name: "g1.tickets".to_string(),
                pending_count: 2,
                consumer_count: 1,
            },
        }));

        let group = ServiceGroupId::new("G1").unwrap();
        let status = client.fetch_status(&group).await.unwrap();
        assert_eq!(status.pending_count, 2);
    }
}
