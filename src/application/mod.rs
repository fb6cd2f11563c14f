//! Application layer - Orchestration over the domain and ports.

mod coordinator;
mod status_client;

pub use coordinator::{CallOutcome, CoordinatorError, TicketCallCoordinator};
pub use status_client::QueueStatusClient;
