//! Wire types shared by the daemon and the ctl client.
//!
//! All request/response bodies use camelCase field names; the response
//! envelope mirrors its `statusCode` in the HTTP status.

use serde::{Deserialize, Serialize};

use crate::model::{Department, EmployeeRecord};

/// Generic response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// Human-readable outcome description.
    pub message: String,
    /// Payload, absent on errors.
    pub data: Option<T>,
    /// Status code, mirrored in the HTTP status.
    pub status_code: u16,
}

impl<T> ApiEnvelope<T> {
    /// Builds an envelope.
    pub fn new(message: impl Into<String>, data: Option<T>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            data,
            status_code,
        }
    }
}

/// Employee representation exposed over the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    /// Internal storage key.
    pub id: String,
    /// External identifier (`EM####`).
    pub employee_id: String,
    /// Full name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Department.
    pub department: Department,
    /// Creation timestamp, epoch milliseconds.
    pub created_at_ms: i64,
    /// Last modification timestamp, epoch milliseconds.
    pub last_modified_at_ms: i64,
}

impl From<EmployeeRecord> for EmployeeDto {
    fn from(record: EmployeeRecord) -> Self {
        Self {
            id: record.id,
            employee_id: record.employee_id,
            full_name: record.full_name,
            email: record.email,
            department: record.department,
            created_at_ms: record.created_at_ms,
            last_modified_at_ms: record.last_modified_at_ms,
        }
    }
}

/// Create request. The external identifier is assigned by the service, never
/// by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    /// Full name, at least 3 characters.
    pub full_name: String,
    /// Email address, unique across all employees.
    pub email: String,
    /// Department.
    pub department: Department,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    /// New full name, if changing.
    pub full_name: Option<String>,
    /// New email, if changing. Re-validated for format and uniqueness.
    pub email: Option<String>,
    /// New department, if changing.
    pub department: Option<Department>,
}

impl UpdateEmployeeRequest {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.department.is_none()
    }
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Zero-based page index.
    pub page: u32,
    /// Requested page size after normalization.
    pub size: u32,
    /// Total matching records.
    pub total: u64,
}
