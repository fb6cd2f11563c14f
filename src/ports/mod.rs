//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `QueueBackend` - REST backend for queue operations
//! - `ServingStorage` - durable slot for the current-serving snapshot
//! - `Notifier` - injected user-notification capability
//! - `QueueEventHandler` - funnel for server-pushed events
//! - `RealtimeTransport` - push channel the bridge connects through

mod event_handler;
mod notifier;
mod queue_backend;
mod realtime_transport;
mod serving_storage;

pub use event_handler::QueueEventHandler;
pub use notifier::{Notifier, NotifyKind};
pub use queue_backend::{BackendError, QueueBackend};
pub use realtime_transport::{EventChannel, RealtimeTransport, TransportError};
pub use serving_storage::{ServingStorage, ServingStorageError};
