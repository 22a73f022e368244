use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// One completed page view: the page left, how long the visitor stayed, and
/// when the visit ended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVisitRecord")]
pub struct VisitRecord {
    page: String,
    time_spent: u32,
    timestamp: DateTime<Utc>,
}

impl VisitRecord {
    pub fn new(page: impl Into<String>, time_spent: u32, timestamp: DateTime<Utc>) -> Self {
        Self { page: page.into(), time_spent, timestamp }
    }

    /// Build a record from a signed dwell value, rejecting negative seconds.
    pub fn try_from_signed(
        page: impl Into<String>,
        seconds: i64,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let page = page.into();
        let time_spent = u32::try_from(seconds).map_err(|_| {
            if seconds < 0 {
                DomainError::NegativeDwellTime { page: page.clone(), seconds }
            } else {
                DomainError::InvariantViolation(format!(
                    "dwell time {seconds}s on `{page}` exceeds the supported range"
                ))
            }
        })?;
        Ok(Self { page, time_spent, timestamp })
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    /// Dwell time in seconds.
    pub fn time_spent(&self) -> u32 {
        self.time_spent
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[derive(Debug, Deserialize)]
struct RawVisitRecord {
    page: String,
    time_spent: i64,
    timestamp: RawTimestamp,
}

/// Navigation layers report either RFC 3339 text or epoch milliseconds.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Rfc3339(DateTime<Utc>),
}

impl TryFrom<RawVisitRecord> for VisitRecord {
    type Error = DomainError;

    fn try_from(raw: RawVisitRecord) -> Result<Self, Self::Error> {
        let timestamp = match raw.timestamp {
            RawTimestamp::Rfc3339(timestamp) => timestamp,
            RawTimestamp::Millis(millis) => DateTime::from_timestamp_millis(millis).ok_or_else(
                || {
                    DomainError::InvariantViolation(format!(
                        "timestamp {millis}ms on `{}` is out of range",
                        raw.page
                    ))
                },
            )?,
        };
        VisitRecord::try_from_signed(raw.page, raw.time_spent, timestamp)
    }
}
