//! Realtime module - Server-pushed queue events and channel lifecycle.

mod connection;
mod events;

pub use connection::ConnectionState;
pub use events::QueueEvent;
