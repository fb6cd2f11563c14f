//! QueueEventHandler port - Funnel for server-pushed queue events.
//!
//! The realtime bridge delivers decoded events through this trait without
//! owning any session state itself; the coordinator implements it so the
//! push path and the direct-action path converge on one state owner.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::realtime::QueueEvent;

/// Handler for processing server-pushed queue events.
///
/// Implementations should be idempotent: the channel gives no delivery
/// guarantees and a reconnect may replay an event.
#[async_trait]
pub trait QueueEventHandler: Send + Sync {
    /// Process one decoded event.
    async fn handle(&self, event: QueueEvent) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}
