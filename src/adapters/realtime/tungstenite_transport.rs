//! WebSocket transport backed by tokio-tungstenite.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::config::RealtimeConfig;
use crate::domain::foundation::ServiceGroupId;
use crate::ports::{EventChannel, RealtimeTransport, TransportError};

/// Production transport connecting to the backend's WebSocket endpoint.
pub struct WsRealtimeTransport {
    base_url: String,
}

impl WsRealtimeTransport {
    pub fn new(config: &RealtimeConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, group: &ServiceGroupId) -> String {
        format!("{}/{}", self.base_url, group)
    }
}

#[async_trait]
impl RealtimeTransport for WsRealtimeTransport {
    async fn connect(
        &self,
        group: &ServiceGroupId,
    ) -> Result<Box<dyn EventChannel>, TransportError> {
        let url = self.endpoint(group);
        debug!(%url, "opening websocket");

        let (stream, response) = connect_async(&url)
            .await
            .map_err(|e| TransportError::ConnectFailed(e.to_string()))?;
        debug!(status = %response.status(), "websocket handshake complete");

        Ok(Box::new(WsEventChannel { stream }))
    }
}

struct WsEventChannel {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl EventChannel for WsEventChannel {
    async fn send(&mut self, text: &str) -> Result<(), TransportError> {
        self.stream
            .send(Message::Text(text.to_string()))
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))
    }

    async fn next(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text)),
                // Tungstenite answers pings itself; control and binary
                // frames carry nothing for us.
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => continue,
                Ok(Message::Binary(_)) | Ok(Message::Frame(_)) => continue,
                Ok(Message::Close(_)) => return None,
                Err(e) => return Some(Err(TransportError::ReceiveFailed(e.to_string()))),
            }
        }
    }
}
