use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("visit to `{page}` has negative dwell time ({seconds}s)")]
    NegativeDwellTime { page: String, seconds: i64 },
    #[error("visit to `{page}` ended at {timestamp} which precedes the previous visit ({previous})")]
    NonChronologicalVisit { page: String, timestamp: DateTime<Utc>, previous: DateTime<Utc> },
    #[error("unknown department id `{0}`")]
    UnknownDepartment(String),
    #[error("invalid business hours {start}..{end} (expected start < end <= 24)")]
    InvalidBusinessHours { start: u8, end: u8 },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("configuration failure: {0}")]
    Configuration(String),
    #[error("input failure: {0}")]
    Input(String),
}

impl ApplicationError {
    /// Stable machine-readable class used in command output envelopes.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "domain_validation",
            Self::Configuration(_) => "config_validation",
            Self::Input(_) => "input",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(_) => "The visit history is malformed. Check dwell times and ordering.",
            Self::Configuration(_) => "The configuration is invalid. Check helpdesk.toml and env.",
            Self::Input(_) => "The input could not be read. Check the file path and format.",
        }
    }
}
