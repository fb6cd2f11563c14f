//! QueueBackend port - Interface to the queue operations REST backend.

use async_trait::async_trait;

use crate::domain::foundation::{ServiceGroupId, TicketNumber};
use crate::domain::queue::QueueStatus;
use crate::domain::serving::{TicketDetail, TicketStatus};

/// Errors from the queue backend.
///
/// Domain rejections (`EmptyQueue`, `TicketNotFound`, `Rejected`) are
/// distinguishable from transient failure (`Unavailable`) so the caller can
/// show a specific message instead of a generic retry prompt.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    #[error("No tickets waiting in the queue")]
    EmptyQueue { message: Option<String> },

    #[error("Ticket not found: {0}")]
    TicketNotFound(TicketNumber),

    #[error("Backend rejected the request: {message}")]
    Rejected { message: String },

    #[error("Backend returned an invalid payload: {reason}")]
    InvalidPayload { reason: String },

    #[error("Backend unavailable: {reason}")]
    Unavailable { reason: String },
}

impl BackendError {
    /// True for failures worth retrying as-is (network, 5xx, timeout).
    pub fn is_transient(&self) -> bool {
        matches!(self, BackendError::Unavailable { .. })
    }
}

/// Port for the queue operations backend.
///
/// One method per REST operation; no retry policy here, the caller decides.
#[async_trait]
pub trait QueueBackend: Send + Sync {
    /// Ask the backend to assign the next waiting ticket in the group to
    /// this counter.
    ///
    /// # Errors
    /// `EmptyQueue` when nothing is waiting; `Rejected` for other named
    /// refusals; `Unavailable` on transport failure.
    async fn call_next(&self, group: &ServiceGroupId) -> Result<TicketNumber, BackendError>;

    /// Fetch the authoritative full record for a ticket.
    async fn ticket_detail(&self, ticket: &TicketNumber) -> Result<TicketDetail, BackendError>;

    /// Send a status change for a ticket.
    ///
    /// The acknowledgement is not authoritative for other fields; callers
    /// must re-fetch the detail afterward.
    async fn update_status(
        &self,
        ticket: &TicketNumber,
        status: TicketStatus,
    ) -> Result<(), BackendError>;

    /// Fetch the current queue metrics for a group.
    async fn queue_status(&self, group: &ServiceGroupId) -> Result<QueueStatus, BackendError>;
}
