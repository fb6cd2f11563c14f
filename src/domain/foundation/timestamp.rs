//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an RFC 3339 string (the wire format for event timestamps).
    pub fn parse_rfc3339(s: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc)))
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_wall_clock() {
        let earlier = Timestamp::now();
        let later =
            Timestamp::from_datetime(*earlier.as_datetime() + chrono::Duration::seconds(5));
        assert!(earlier < later);
    }

    #[test]
    fn parses_rfc3339() {
        let ts = Timestamp::parse_rfc3339("2024-05-01T08:30:00Z").unwrap();
        assert_eq!(ts.to_string(), "2024-05-01T08:30:00+00:00");
    }

    #[test]
    fn rejects_malformed_rfc3339() {
        assert!(Timestamp::parse_rfc3339("yesterday at noon").is_err());
    }
}
