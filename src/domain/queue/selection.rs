//! ServiceGroupSelection - the staff member's chosen work queue.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ServiceGroupId;

/// The service group a counter session is currently working.
///
/// Owned exclusively by the dashboard session. Replacing the selection
/// invalidates the cached QueueStatus but deliberately does not clear the
/// current serving ticket; see `TicketCallCoordinator::set_selection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceGroupSelection {
    /// The selected group's identifier.
    pub group_id: ServiceGroupId,

    /// Cached display name for the group (e.g. "Land Registration").
    pub display_name: String,
}

impl ServiceGroupSelection {
    /// Creates a selection for the given group.
    pub fn new(group_id: ServiceGroupId, display_name: impl Into<String>) -> Self {
        Self {
            group_id,
            display_name: display_name.into(),
        }
    }
}
