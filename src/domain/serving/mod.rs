//! Serving module - The ticket a counter is actively working.

mod session;
mod ticket;
mod ticket_status;

pub use session::{EventOutcome, ServingSession};
pub use ticket::{CurrentServingTicket, TicketDetail, UNKNOWN_NAME};
pub use ticket_status::TicketStatus;
