use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::errors::DomainError;

/// Opening window for a department phone line, evaluated in local time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BusinessHours {
    start_hour: u8,
    end_hour: u8,
    open_weekends: bool,
    always_open: bool,
}

impl BusinessHours {
    /// Hours `start_hour..end_hour`; `end_hour` may be 24 for midnight.
    pub fn new(start_hour: u8, end_hour: u8, open_weekends: bool) -> Result<Self, DomainError> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(DomainError::InvalidBusinessHours { start: start_hour, end: end_hour });
        }
        Ok(Self { start_hour, end_hour, open_weekends, always_open: false })
    }

    /// Line staffed around the clock, e.g. an emergency number.
    pub fn always_open() -> Self {
        Self { start_hour: 0, end_hour: 24, open_weekends: true, always_open: true }
    }

    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    pub fn is_open_at(&self, at: NaiveDateTime) -> bool {
        if self.always_open {
            return true;
        }

        let weekend = matches!(at.weekday(), Weekday::Sat | Weekday::Sun);
        if weekend && !self.open_weekends {
            return false;
        }

        let hour = at.hour();
        u32::from(self.start_hour) <= hour && hour < u32::from(self.end_hour)
    }

    /// Short label such as `Mon-Fri 9:00-17:00` or `24/7`.
    pub fn label(&self) -> String {
        if self.always_open {
            return "24/7".to_owned();
        }
        let days = if self.open_weekends { "Daily" } else { "Mon-Fri" };
        format!("{days} {}:00-{}:00", self.start_hour, self.end_hour)
    }
}
