//! Adapters - Implementations of ports against real infrastructure.

pub mod http;
pub mod notify;
pub mod realtime;
pub mod storage;
