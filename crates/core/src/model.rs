//! Domain model for employee records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Internal storage key (ULID string).
pub type Id = String;

/// Closed set of departments an employee can belong to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    /// Human resources.
    Hr,
    /// Engineering.
    Engineering,
    /// Marketing.
    Marketing,
    /// Sales.
    Sales,
}

impl Department {
    /// Wire/storage form, e.g. `ENGINEERING`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hr => "HR",
            Self::Engineering => "ENGINEERING",
            Self::Marketing => "MARKETING",
            Self::Sales => "SALES",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HR" => Ok(Self::Hr),
            "ENGINEERING" => Ok(Self::Engineering),
            "MARKETING" => Ok(Self::Marketing),
            "SALES" => Ok(Self::Sales),
            other => Err(format!("unknown department: `{other}`")),
        }
    }
}

/// Canonical employee record.
///
/// `id` is the internal storage key; `employee_id` is the external
/// human-readable identifier (`EM####`) and is immutable once assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeRecord {
    /// Internal storage key.
    pub id: Id,
    /// External identifier, unique across all employees.
    pub employee_id: String,
    /// Full name.
    pub full_name: String,
    /// Email address, unique across all employees.
    pub email: String,
    /// Department.
    pub department: Department,
    /// Creation timestamp in epoch milliseconds.
    pub created_at_ms: i64,
    /// Last modification timestamp in epoch milliseconds.
    pub last_modified_at_ms: i64,
}
