//! External employee identifier minting.

/// Counter name used to mint employee identifiers.
pub const EMPLOYEE_ID_COUNTER: &str = "employeeId";

/// Formats a sequence value as an external employee id.
///
/// The identifier is `EM` followed by the value zero-padded to four digits
/// (`7` → `EM0007`). Values past `9999` widen rather than truncate
/// (`10000` → `EM10000`).
pub fn format_employee_id(sequence: i64) -> String {
    format!("EM{sequence:04}")
}
