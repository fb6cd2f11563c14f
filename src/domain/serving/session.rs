//! ServingSession aggregate - one counter's view of its work.
//!
//! Pure state: the session never performs I/O. The application layer owns
//! an instance behind a lock and commits whole-record mutations through it,
//! which is what makes "at most one current ticket" and last-write-wins
//! reconciliation hold across the direct and push paths.

use crate::domain::queue::{QueueStatus, ServiceGroupSelection};
use crate::domain::realtime::QueueEvent;

use super::CurrentServingTicket;

/// What an applied push event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Queue snapshot replaced.
    QueueRefreshed,
    /// Current serving ticket replaced whole.
    CurrentReplaced,
    /// Current serving ticket cleared.
    CurrentCleared,
    /// Only the current ticket's status field changed.
    StatusUpdated,
    /// Event did not concern this session's state.
    Ignored,
}

impl EventOutcome {
    /// Returns true when the persisted snapshot must be rewritten.
    pub fn needs_persist(&self) -> bool {
        matches!(
            self,
            EventOutcome::CurrentReplaced | EventOutcome::StatusUpdated
        )
    }

    /// Returns true when the persisted snapshot must be removed.
    pub fn needs_clear(&self) -> bool {
        matches!(self, EventOutcome::CurrentCleared)
    }
}

/// State owned by one counter session.
#[derive(Debug, Clone, Default)]
pub struct ServingSession {
    selection: Option<ServiceGroupSelection>,
    current: Option<CurrentServingTicket>,
    queue_status: Option<QueueStatus>,
}

impl ServingSession {
    /// Creates an empty session: no selection, no ticket, no snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected service group, if any.
    pub fn selection(&self) -> Option<&ServiceGroupSelection> {
        self.selection.as_ref()
    }

    /// Replaces the selected service group.
    ///
    /// Invalidates the cached queue snapshot. The current serving ticket is
    /// intentionally left in place: a ticket called under the previous group
    /// keeps displaying until completed or explicitly cleared.
    pub fn set_selection(&mut self, selection: ServiceGroupSelection) {
        self.selection = Some(selection);
        self.queue_status = None;
    }

    /// The ticket currently being served, if any.
    pub fn current(&self) -> Option<&CurrentServingTicket> {
        self.current.as_ref()
    }

    /// The last known queue snapshot, if any.
    pub fn queue_status(&self) -> Option<&QueueStatus> {
        self.queue_status.as_ref()
    }

    /// Replaces the cached queue snapshot whole.
    pub fn set_queue_status(&mut self, status: QueueStatus) {
        self.queue_status = Some(status);
    }

    /// Replaces the current serving ticket whole. No merging.
    pub fn replace_current(&mut self, ticket: CurrentServingTicket) {
        self.current = Some(ticket);
    }

    /// Drops the current serving ticket.
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Installs a snapshot recovered from storage as the current ticket.
    pub fn restore(&mut self, ticket: CurrentServingTicket) {
        self.current = Some(ticket);
    }

    /// Applies a server-pushed event to the session state.
    ///
    /// Events about tickets other than the tracked one are ignored; a
    /// `TicketCalled` always overwrites since the backend just assigned
    /// that ticket to this counter's group.
    pub fn apply_event(&mut self, event: &QueueEvent) -> EventOutcome {
        match event {
            QueueEvent::QueueUpdated { status, .. } => {
                self.queue_status = Some(status.clone());
                EventOutcome::QueueRefreshed
            }
            QueueEvent::TicketCalled {
                ticket_number,
                full_name,
                status,
                called_at,
                ..
            } => {
                self.current = Some(CurrentServingTicket::from_push(
                    ticket_number.clone(),
                    full_name.clone(),
                    *status,
                    *called_at,
                ));
                EventOutcome::CurrentReplaced
            }
            QueueEvent::TicketCompleted { ticket_number, .. } => {
                if self.is_current(ticket_number) {
                    self.current = None;
                    EventOutcome::CurrentCleared
                } else {
                    EventOutcome::Ignored
                }
            }
            QueueEvent::StatusChanged {
                ticket_number,
                status,
                ..
            } => {
                if self.is_current(ticket_number) {
                    let updated = self
                        .current
                        .as_ref()
                        .map(|ticket| ticket.with_status(*status));
                    self.current = updated;
                    EventOutcome::StatusUpdated
                } else {
                    EventOutcome::Ignored
                }
            }
        }
    }

    fn is_current(&self, ticket_number: &crate::domain::foundation::TicketNumber) -> bool {
        self.current
            .as_ref()
            .map(|ticket| &ticket.ticket_number == ticket_number)
            .unwrap_or(false)
    }
}
