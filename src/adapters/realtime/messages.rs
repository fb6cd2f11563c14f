//! Wire messages for the realtime push channel.
//!
//! Frames are JSON envelopes `{type, data, timestamp}` with `type` one of
//! `queue_update`, `ticket_called`, `ticket_completed`, `status_changed`.
//! Decoding happens once here, at the boundary: a frame either becomes a
//! typed `QueueEvent` or is dropped with a warning. Unknown or malformed
//! payloads never crash the listener.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::foundation::{ServiceGroupId, TicketNumber, Timestamp};
use crate::domain::queue::QueueStatus;
use crate::domain::realtime::QueueEvent;
use crate::domain::serving::TicketStatus;

/// Raw frame envelope as received from the server.
#[derive(Debug, Deserialize)]
struct WireEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TicketCalledData {
    ticket_number: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    status: Option<TicketStatus>,
    #[serde(default)]
    called_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TicketRefData {
    ticket_number: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusChangedData {
    ticket_number: String,
    status: TicketStatus,
}

/// Client -> server subscription handshake, sent immediately on connect.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscribeMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    service_group_id: &'a str,
}

/// Builds the subscribe frame for a service group.
pub fn subscribe_message(group: &ServiceGroupId) -> String {
    serde_json::to_string(&SubscribeMessage {
        kind: "subscribe",
        service_group_id: group.as_str(),
    })
    .expect("subscribe message serialization cannot fail")
}

/// Decodes one text frame into a QueueEvent.
///
/// Returns `None` for unknown event types and malformed payloads, after
/// logging; a missing or unparsable timestamp falls back to arrival time.
pub fn decode_event(text: &str) -> Option<QueueEvent> {
    let wire: WireEvent = match serde_json::from_str(text) {
        Ok(wire) => wire,
        Err(err) => {
            warn!(error = %err, "dropping malformed realtime frame");
            return None;
        }
    };

    let at = wire
        .timestamp
        .as_deref()
        .and_then(|ts| Timestamp::parse_rfc3339(ts).ok())
        .unwrap_or_else(Timestamp::now);

    let decoded = match wire.kind.as_str() {
        "queue_update" => serde_json::from_value::<QueueStatus>(wire.data)
            .map(|status| QueueEvent::QueueUpdated { status, at }),
        "ticket_called" => serde_json::from_value::<TicketCalledData>(wire.data).and_then(|data| {
            Ok(QueueEvent::TicketCalled {
                ticket_number: ticket_number(data.ticket_number)?,
                full_name: data.full_name,
                status: data.status,
                called_at: data.called_at,
                at,
            })
        }),
        "ticket_completed" => serde_json::from_value::<TicketRefData>(wire.data).and_then(|data| {
            Ok(QueueEvent::TicketCompleted {
                ticket_number: ticket_number(data.ticket_number)?,
                at,
            })
        }),
        "status_changed" => serde_json::from_value::<StatusChangedData>(wire.data).and_then(|data| {
            Ok(QueueEvent::StatusChanged {
                ticket_number: ticket_number(data.ticket_number)?,
                status: data.status,
                at,
            })
        }),
        other => {
            warn!(kind = other, "dropping unknown realtime event type");
            return None;
        }
    };

    match decoded {
        Ok(event) => Some(event),
        Err(err) => {
            warn!(kind = %wire.kind, error = %err, "dropping realtime event with bad payload");
            None
        }
    }
}

fn ticket_number(raw: String) -> Result<TicketNumber, serde_json::Error> {
    TicketNumber::new(raw).map_err(serde::de::Error::custom)
}
