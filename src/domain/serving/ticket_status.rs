//! TicketStatus enum - lifecycle status of a queue ticket.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Lifecycle status of a ticket, as assigned by the backend.
///
/// The set is closed: any other value on the wire is a protocol violation
/// and fails decoding. Transitions between members are deliberately
/// unrestricted; the backend is the authority on what changes it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    Waiting,
    Processing,
    Calling,
    Completed,
    Skipped,
    Cancelled,
    NoShow,
}

impl TicketStatus {
    /// All members, in display order.
    pub const ALL: [TicketStatus; 7] = [
        TicketStatus::Waiting,
        TicketStatus::Processing,
        TicketStatus::Calling,
        TicketStatus::Completed,
        TicketStatus::Skipped,
        TicketStatus::Cancelled,
        TicketStatus::NoShow,
    ];

    /// Returns true for statuses that end a ticket's time at the counter.
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            TicketStatus::Completed
                | TicketStatus::Skipped
                | TicketStatus::Cancelled
                | TicketStatus::NoShow
        )
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TicketStatus::Waiting => "Waiting",
            TicketStatus::Processing => "Processing",
            TicketStatus::Calling => "Calling",
            TicketStatus::Completed => "Completed",
            TicketStatus::Skipped => "Skipped",
            TicketStatus::Cancelled => "Cancelled",
            TicketStatus::NoShow => "NoShow",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TicketStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Waiting" => Ok(TicketStatus::Waiting),
            "Processing" => Ok(TicketStatus::Processing),
            "Calling" => Ok(TicketStatus::Calling),
            "Completed" => Ok(TicketStatus::Completed),
            "Skipped" => Ok(TicketStatus::Skipped),
            "Cancelled" => Ok(TicketStatus::Cancelled),
            "NoShow" => Ok(TicketStatus::NoShow),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown ticket status '{}'", other),
            )),
        }
    }
}
