//! Domain layer - Business logic and domain types.
//!
//! Pure domain code: no I/O, no framework types. Adapters and the
//! application layer depend on this module, never the other way around.

pub mod foundation;
pub mod queue;
pub mod realtime;
pub mod serving;
