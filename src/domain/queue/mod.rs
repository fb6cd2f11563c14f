//! Queue module - Service group queues and their metrics.

mod selection;
mod status;

pub use selection::ServiceGroupSelection;
pub use status::QueueStatus;
