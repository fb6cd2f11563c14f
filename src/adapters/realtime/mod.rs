//! Realtime adapters - WebSocket push channel and event bridge.

mod bridge;
mod messages;
mod tungstenite_transport;

pub use bridge::RealtimeEventBridge;
pub use messages::{decode_event, subscribe_message};
pub use tungstenite_transport::WsRealtimeTransport;
