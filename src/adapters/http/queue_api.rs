//! Queue API adapter - Implementation of QueueBackend over the REST contract.
//!
//! Endpoints:
//! - `POST {base}/call-next/{group}`
//! - `GET {base}/ticket/{number}`
//! - `PUT {base}/ticket/{number}/status`
//! - `GET {base}/queue-status/{group}`
//!
//! The call-next acknowledgement only carries a ticket number; the caller
//! fetches the full detail separately. A `success=false` response without a
//! ticket number is classified as empty-queue or a named rejection from the
//! message text.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::BackendConfig;
use crate::domain::foundation::{ServiceGroupId, TicketNumber};
use crate::domain::queue::QueueStatus;
use crate::domain::serving::{TicketDetail, TicketStatus};
use crate::ports::{BackendError, QueueBackend};

/// Configuration for the queue API client.
#[derive(Debug, Clone)]
pub struct QueueApiConfig {
    /// Base URL of the queue backend API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl QueueApiConfig {
    /// Creates a configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&BackendConfig> for QueueApiConfig {
    fn from(config: &BackendConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.request_timeout(),
        }
    }
}

/// Queue backend implementation over HTTP.
pub struct HttpQueueBackend {
    config: QueueApiConfig,
    client: Client,
}

impl HttpQueueBackend {
    /// Creates a new backend client with the given configuration.
    pub fn new(config: QueueApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn call_next_url(&self, group: &ServiceGroupId) -> String {
        format!("{}/call-next/{}", self.config.base_url, group)
    }

    fn ticket_url(&self, ticket: &TicketNumber) -> String {
        format!("{}/ticket/{}", self.config.base_url, ticket)
    }

    fn ticket_status_url(&self, ticket: &TicketNumber) -> String {
        format!("{}/ticket/{}/status", self.config.base_url, ticket)
    }

    fn queue_status_url(&self, group: &ServiceGroupId) -> String {
        format!("{}/queue-status/{}", self.config.base_url, group)
    }
}

fn transport_error(err: reqwest::Error) -> BackendError {
    BackendError::Unavailable {
        reason: err.to_string(),
    }
}

fn status_error(status: StatusCode) -> BackendError {
    if status.is_server_error() {
        BackendError::Unavailable {
            reason: format!("backend returned {}", status),
        }
    } else {
        BackendError::Rejected {
            message: format!("backend returned {}", status),
        }
    }
}

// ============================================
// Wire DTOs
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallNextResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<CallNextData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallNextData {
    ticket_number: String,
}

#[derive(Debug, Serialize)]
struct UpdateStatusRequest {
    status: TicketStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AckResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueueStatusResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<QueueStatus>,
}

/// Classifies a call-next acknowledgement into a ticket number or error.
///
/// `success=false` without a ticket number signals either an empty queue or
/// another named failure; the distinction rides in the message text.
fn classify_call_next(response: CallNextResponse) -> Result<TicketNumber, BackendError> {
    if response.success {
        if let Some(data) = response.data {
            return TicketNumber::new(data.ticket_number).map_err(|err| {
                BackendError::InvalidPayload {
                    reason: err.to_string(),
                }
            });
        }
        return Err(BackendError::InvalidPayload {
            reason: "success acknowledgement without a ticket number".to_string(),
        });
    }

    match response.message {
        None => Err(BackendError::EmptyQueue { message: None }),
        Some(message) => {
            let lowered = message.to_lowercase();
            if lowered.contains("empty") || lowered.contains("no ticket") {
                Err(BackendError::EmptyQueue {
                    message: Some(message),
                })
            } else {
                Err(BackendError::Rejected { message })
            }
        }
    }
}

#[async_trait]
impl QueueBackend for HttpQueueBackend {
    async fn call_next(&self, group: &ServiceGroupId) -> Result<TicketNumber, BackendError> {
        let response = self
            .client
            .post(self.call_next_url(group))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        let body: CallNextResponse = response.json().await.map_err(|err| {
            BackendError::InvalidPayload {
                reason: err.to_string(),
            }
        })?;

        classify_call_next(body)
    }

    async fn ticket_detail(&self, ticket: &TicketNumber) -> Result<TicketDetail, BackendError> {
        let response = self
            .client
            .get(self.ticket_url(ticket))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::TicketNotFound(ticket.clone()));
        }
        if !status.is_success() {
            return Err(status_error(status));
        }

        response.json().await.map_err(|err| BackendError::InvalidPayload {
            reason: err.to_string(),
        })
    }

    async fn update_status(
        &self,
        ticket: &TicketNumber,
        status: TicketStatus,
    ) -> Result<(), BackendError> {
        let response = self
            .client
            .put(self.ticket_status_url(ticket))
            .json(&UpdateStatusRequest { status })
            .send()
            .await
            .map_err(transport_error)?;

        let http_status = response.status();
        if http_status == StatusCode::NOT_FOUND {
            return Err(BackendError::TicketNotFound(ticket.clone()));
        }
        if !http_status.is_success() {
            return Err(status_error(http_status));
        }

        let ack: AckResponse = response.json().await.map_err(|err| {
            BackendError::InvalidPayload {
                reason: err.to_string(),
            }
        })?;

        if !ack.success {
            return Err(BackendError::Rejected {
                message: ack
                    .message
                    .unwrap_or_else(|| "status update rejected".to_string()),
            });
        }

        Ok(())
    }

    async fn queue_status(&self, group: &ServiceGroupId) -> Result<QueueStatus, BackendError> {
        let response = self
            .client
            .get(self.queue_status_url(group))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        let body: QueueStatusResponse = response.json().await.map_err(|err| {
            BackendError::InvalidPayload {
                reason: err.to_string(),
            }
        })?;

        if !body.success {
            return Err(BackendError::Rejected {
                message: body
                    .message
                    .unwrap_or_else(|| "queue status request failed".to_string()),
            });
        }

        body.data.ok_or_else(|| BackendError::InvalidPayload {
            reason: "queue status acknowledgement without data".to_string(),
        })
    }
}
