//! Integration tests for the core crate.

use std::collections::HashSet;
use std::str::FromStr;

use employee_core::api::{ApiEnvelope, CreateEmployeeRequest, EmployeeDto, UpdateEmployeeRequest};
use employee_core::ids::format_employee_id;
use employee_core::model::{Department, EmployeeRecord};

#[test]
fn test_department_serde() {
    let engineering = Department::Engineering;
    let serialized = serde_json::to_string(&engineering).unwrap();
    assert_eq!(serialized, r#""ENGINEERING""#);
    let deserialized: Department = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized, engineering);

    let hr: Department = serde_json::from_str(r#""HR""#).unwrap();
    assert_eq!(hr, Department::Hr);

    assert!(serde_json::from_str::<Department>(r#""LEGAL""#).is_err());
}

#[test]
fn test_department_from_str_is_case_insensitive() {
    assert_eq!(Department::from_str("sales").unwrap(), Department::Sales);
    assert_eq!(Department::from_str("Marketing").unwrap(), Department::Marketing);
    assert!(Department::from_str("legal").is_err());
}

#[test]
fn test_employee_dto_uses_camel_case_wire_names() {
    let dto = EmployeeDto {
        id: "01J0000000000000000000000X".into(),
        employee_id: "EM0007".into(),
        full_name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        department: Department::Engineering,
        created_at_ms: 1,
        last_modified_at_ms: 2,
    };

    let value = serde_json::to_value(&dto).unwrap();
    assert_eq!(value["employeeId"], "EM0007");
    assert_eq!(value["fullName"], "Ada Lovelace");
    assert_eq!(value["createdAtMs"], 1);
    assert_eq!(value["lastModifiedAtMs"], 2);
}

#[test]
fn test_dto_from_record() {
    let record = EmployeeRecord {
        id: "key".into(),
        employee_id: "EM0042".into(),
        full_name: "Grace Hopper".into(),
        email: "grace@example.com".into(),
        department: Department::Engineering,
        created_at_ms: 10,
        last_modified_at_ms: 20,
    };
    let dto = EmployeeDto::from(record.clone());
    assert_eq!(dto.id, record.id);
    assert_eq!(dto.employee_id, record.employee_id);
    assert_eq!(dto.email, record.email);
}

#[test]
fn test_envelope_serde() {
    let env = ApiEnvelope::new("Employee created successfully.", Some(7u32), 201);
    let value = serde_json::to_value(&env).unwrap();
    assert_eq!(value["statusCode"], 201);
    assert_eq!(value["data"], 7);

    let err: ApiEnvelope<EmployeeDto> =
        serde_json::from_str(r#"{"message":"not found","data":null,"statusCode":404}"#).unwrap();
    assert!(err.data.is_none());
    assert_eq!(err.status_code, 404);
}

#[test]
fn test_create_request_parses_wire_names() {
    let req: CreateEmployeeRequest = serde_json::from_str(
        r#"{"fullName":"Ada Lovelace","email":"ada@example.com","department":"ENGINEERING"}"#,
    )
    .unwrap();
    assert_eq!(req.full_name, "Ada Lovelace");
    assert_eq!(req.department, Department::Engineering);
}

#[test]
fn test_update_request_absent_fields_are_none() {
    let patch: UpdateEmployeeRequest =
        serde_json::from_str(r#"{"department":"SALES"}"#).unwrap();
    assert!(patch.full_name.is_none());
    assert!(patch.email.is_none());
    assert_eq!(patch.department, Some(Department::Sales));
    assert!(!patch.is_empty());

    let empty: UpdateEmployeeRequest = serde_json::from_str("{}").unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_format_employee_id_pads_to_four_digits() {
    assert_eq!(format_employee_id(1), "EM0001");
    assert_eq!(format_employee_id(7), "EM0007");
    assert_eq!(format_employee_id(42), "EM0042");
    assert_eq!(format_employee_id(9999), "EM9999");
}

#[test]
fn test_format_employee_id_widens_past_9999() {
    assert_eq!(format_employee_id(10000), "EM10000");
    assert_eq!(format_employee_id(123456), "EM123456");
}

#[test]
fn test_format_employee_id_is_injective_in_padded_range() {
    let mut seen = HashSet::new();
    for sequence in 0..10_000 {
        assert!(seen.insert(format_employee_id(sequence)));
    }
    assert_eq!(seen.len(), 10_000);
}
