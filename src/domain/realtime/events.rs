//! QueueEvent - closed tagged union of server-pushed queue changes.
//!
//! The wire payloads are dynamic JSON; they are decoded once at the
//! adapter boundary (`adapters::realtime::messages`) into this sum type so
//! nothing past the boundary handles untyped data.

use crate::domain::foundation::{TicketNumber, Timestamp};
use crate::domain::queue::QueueStatus;
use crate::domain::serving::TicketStatus;

/// A server-pushed event about a queue or ticket, carrying the server's
/// timestamp for arrival-order diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueEvent {
    /// The group's queue metrics changed.
    QueueUpdated { status: QueueStatus, at: Timestamp },

    /// A ticket was assigned to this group's counter. Optional fields may
    /// be absent on the wire; consumers fall back to placeholders.
    TicketCalled {
        ticket_number: TicketNumber,
        full_name: Option<String>,
        status: Option<TicketStatus>,
        called_at: Option<Timestamp>,
        at: Timestamp,
    },

    /// A ticket finished; clears the current serving record on match.
    TicketCompleted {
        ticket_number: TicketNumber,
        at: Timestamp,
    },

    /// A ticket's status changed; updates only the status field on match.
    StatusChanged {
        ticket_number: TicketNumber,
        status: TicketStatus,
        at: Timestamp,
    },
}

impl QueueEvent {
    /// The ticket this event concerns, if any.
    pub fn ticket_number(&self) -> Option<&TicketNumber> {
        match self {
            QueueEvent::QueueUpdated { .. } => None,
            QueueEvent::TicketCalled { ticket_number, .. }
            | QueueEvent::TicketCompleted { ticket_number, .. }
            | QueueEvent::StatusChanged { ticket_number, .. } => Some(ticket_number),
        }
    }

    /// Short tag for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            QueueEvent::QueueUpdated { .. } => "queue_update",
            QueueEvent::TicketCalled { .. } => "ticket_called",
            QueueEvent::TicketCompleted { .. } => "ticket_completed",
            QueueEvent::StatusChanged { .. } => "status_changed",
        }
    }
}
