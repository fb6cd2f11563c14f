//! HTTP adapter - reqwest-backed implementation of the queue backend port.

mod queue_api;

pub use queue_api::{HttpQueueBackend, QueueApiConfig};
