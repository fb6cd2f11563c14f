//! RealtimeTransport port - The push channel the bridge connects through.
//!
//! Abstracting the WebSocket behind a port keeps the bridge's reconnect
//! state machine testable with an in-memory channel.

use async_trait::async_trait;

use crate::domain::foundation::ServiceGroupId;

/// Errors from the push-channel transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to connect: {0}")]
    ConnectFailed(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Receive failed: {0}")]
    ReceiveFailed(String),
}

/// An established push channel carrying text frames.
#[async_trait]
pub trait EventChannel: Send {
    /// Send a text frame (used for the subscribe handshake).
    async fn send(&mut self, text: &str) -> Result<(), TransportError>;

    /// Receive the next text frame.
    ///
    /// Returns `None` when the peer closed the channel cleanly.
    async fn next(&mut self) -> Option<Result<String, TransportError>>;
}

/// Port for establishing push channels to the backend.
#[async_trait]
pub trait RealtimeTransport: Send + Sync {
    /// Open a channel scoped to the given service group.
    async fn connect(
        &self,
        group: &ServiceGroupId,
    ) -> Result<Box<dyn EventChannel>, TransportError>;
}
