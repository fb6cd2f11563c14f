//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Identifier of a service group - the administrative grouping behind
/// one counter work queue.
///
/// Backend-assigned and opaque to this crate; the only local rule is that
/// it is never empty, which keeps the "do not call the backend with a
/// missing group" guard in the type system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceGroupId(String);

impl ServiceGroupId {
    /// Creates a ServiceGroupId, rejecting empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("service_group_id"));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServiceGroupId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Backend-assigned ticket number, unique per ticket (e.g. "A015").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketNumber(String);

impl TicketNumber {
    /// Creates a TicketNumber, rejecting empty or whitespace-only input.
    pub fn new(number: impl Into<String>) -> Result<Self, ValidationError> {
        let number = number.into();
        if number.trim().is_empty() {
            return Err(ValidationError::empty_field("ticket_number"));
        }
        Ok(Self(number))
    }

    /// Returns the ticket number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicketNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Unique identifier for one counter session.
///
/// Keys the persistence slot holding the current-serving snapshot, so two
/// counters on the same machine never overwrite each other's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterId(Uuid);

impl CounterId {
    /// Creates a new random CounterId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a CounterId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CounterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CounterId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_group_id_rejects_empty() {
        assert!(ServiceGroupId::new("").is_err());
        assert!(ServiceGroupId::new("   ").is_err());
    }

    #[test]
    fn service_group_id_accepts_and_displays() {
        let id = ServiceGroupId::new("G1").unwrap();
        assert_eq!(id.as_str(), "G1");
        assert_eq!(id.to_string(), "G1");
    }

    #[test]
    fn ticket_number_rejects_empty() {
        assert!(TicketNumber::new("").is_err());
    }

    #[test]
    fn ticket_number_round_trips_serde() {
        let number = TicketNumber::new("A015").unwrap();
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"A015\"");
        let back: TicketNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, number);
    }

    #[test]
    fn counter_ids_are_unique() {
        assert_ne!(CounterId::new(), CounterId::new());
    }

    #[test]
    fn counter_id_parses_from_string() {
        let id = CounterId::new();
        let parsed: CounterId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
