//! Notifier adapters.

mod in_memory_notifier;
mod tracing_notifier;

pub use in_memory_notifier::InMemoryNotifier;
pub use tracing_notifier::TracingNotifier;
