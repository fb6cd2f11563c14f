//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid backend base URL")]
    InvalidBaseUrl,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid realtime URL (must be ws:// or wss://)")]
    InvalidRealtimeUrl,

    #[error("Reconnect attempts must be at least 1")]
    InvalidReconnectAttempts,

    #[error("Reconnect base delay must be non-zero")]
    InvalidReconnectDelay,

    #[error("Storage data directory cannot be empty")]
    EmptyDataDir,
}
