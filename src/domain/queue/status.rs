//! QueueStatus - point-in-time snapshot of a service group's pending work.

use serde::{Deserialize, Serialize};

/// Snapshot of the pending work in one service group's queue.
///
/// Immutable and always re-derivable from the server: each fetch or push
/// replaces the whole snapshot, so it is never persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus {
    /// Identifier of the underlying queue.
    pub queue_name: String,

    /// Number of tickets waiting to be called.
    pub pending_count: u32,

    /// Number of active consumers on the queue (informational).
    pub consumer_count: u32,
}

impl QueueStatus {
    /// Returns true when there is nothing waiting to be called.
    pub fn is_empty(&self) -> bool {
        self.pending_count == 0
    }
}
