use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Support team a visitor can be routed to.
///
/// Declaration order is significant: it is the accumulator layout and the
/// tie-break order when two departments score equally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Sales,
    Support,
    Tech,
    Billing,
    General,
}

impl Department {
    pub const ALL: [Department; 5] =
        [Department::Sales, Department::Support, Department::Tech, Department::Billing, Department::General];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        match self {
            Department::Sales => 0,
            Department::Support => 1,
            Department::Tech => 2,
            Department::Billing => 3,
            Department::General => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Department::Sales => "sales",
            Department::Support => "support",
            Department::Tech => "tech",
            Department::Billing => "billing",
            Department::General => "general",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Department::ALL
            .into_iter()
            .find(|department| department.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownDepartment(value.to_owned()))
    }
}
