//! Counter Desk - Staff queue-calling and ticket synchronization core.
//!
//! This crate implements the counter-side workflow of a public-service
//! administration center: pulling the next waiting ticket from a service
//! group's queue, tracking which ticket a counter is currently serving,
//! persisting that across restarts, and reconciling it with server-pushed
//! events over a best-effort WebSocket channel.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
