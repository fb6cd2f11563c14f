//! Realtime push channel configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Realtime channel and reconnect policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// WebSocket base URL; the service group id is appended per connection
    #[serde(default = "default_url")]
    pub url: String,

    /// Whether the push channel is enabled at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Consecutive connection failures tolerated before giving up
    #[serde(default = "default_max_attempts")]
    pub max_reconnect_attempts: u32,

    /// Base delay for linear backoff; attempt n waits n times this
    #[serde(default = "default_base_delay")]
    pub reconnect_base_delay_secs: u64,
}

impl RealtimeConfig {
    /// Backoff delay before the given attempt (1-based): linear in the
    /// attempt number.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_secs(self.reconnect_base_delay_secs * u64::from(attempt))
    }

    /// Validate realtime configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.url.starts_with("ws://") && !self.url.starts_with("wss://") {
            return Err(ValidationError::InvalidRealtimeUrl);
        }
        if self.max_reconnect_attempts == 0 {
            return Err(ValidationError::InvalidReconnectAttempts);
        }
        if self.reconnect_base_delay_secs == 0 {
            return Err(ValidationError::InvalidReconnectDelay);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            enabled: default_enabled(),
            max_reconnect_attempts: default_max_attempts(),
            reconnect_base_delay_secs: default_base_delay(),
        }
    }
}

fn default_url() -> String {
    "ws://localhost:8080/ws/queue".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    5
}

fn default_base_delay() -> u64 {
    3
}
