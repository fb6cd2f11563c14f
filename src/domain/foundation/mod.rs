//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the counter-desk domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CounterId, ServiceGroupId, TicketNumber};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
