//! Ticket records: the authoritative detail and the counter's serving view.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{TicketNumber, Timestamp};

use super::TicketStatus;

/// Display name used when a push event carries no name for a ticket.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Full ticket record as returned by the backend detail endpoint.
///
/// This is the authoritative shape; local status edits are never trusted
/// until a re-fetch confirms them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetail {
    pub ticket_number: TicketNumber,
    pub full_name: String,
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub called_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// The ticket a counter session believes it is actively serving.
///
/// At most one exists per counter session; assigning a new one replaces the
/// previous record whole, never merges. Persisted as a single snapshot so a
/// reload can recover it without contacting the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentServingTicket {
    pub ticket_number: TicketNumber,
    pub full_name: String,
    pub status: TicketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub called_at: Option<Timestamp>,
}

impl CurrentServingTicket {
    /// Builds the serving view from an authoritative detail record.
    pub fn from_detail(detail: &TicketDetail) -> Self {
        Self {
            ticket_number: detail.ticket_number.clone(),
            full_name: detail.full_name.clone(),
            status: detail.status,
            called_at: detail.called_at,
        }
    }

    /// Builds a serving record from a push event, filling gaps with
    /// placeholders rather than failing.
    pub fn from_push(
        ticket_number: TicketNumber,
        full_name: Option<String>,
        status: Option<TicketStatus>,
        called_at: Option<Timestamp>,
    ) -> Self {
        Self {
            ticket_number,
            full_name: full_name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            status: status.unwrap_or(TicketStatus::Calling),
            called_at,
        }
    }

    /// Returns a copy with only the status replaced.
    pub fn with_status(&self, status: TicketStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
