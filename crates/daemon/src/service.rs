//! Employee operations: validation, duplicate checks, identifier assignment
//! and persistence calls, translated into outcome envelopes by the api layer.

use std::sync::Arc;

use employee_core::api::{CreateEmployeeRequest, EmployeeDto, Paged, UpdateEmployeeRequest};
use employee_core::ids::{format_employee_id, EMPLOYEE_ID_COUNTER};
use employee_core::validation::{check_full_name, is_valid_email, validate_new_employee};
use employee_core::{new_ulid, now_ms};
use serde_json::json;
use tracing::{info, warn};

use crate::api::AppState;
use crate::db::{EmployeeContent, EmployeeRow};
use crate::error::ApiError;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

fn normalize_page(page: Option<u32>, size: Option<u32>) -> (u32, u32) {
    let page = page.unwrap_or(0);
    let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, size)
}

fn to_dto(row: EmployeeRow) -> EmployeeDto {
    EmployeeDto::from(row.into_record())
}

/// Creates an employee: validate, reject duplicate emails, mint the next
/// external identifier and persist.
///
/// There is no transaction spanning the counter increment and the insert; a
/// failure in between burns a sequence value, which is an accepted gap. A
/// failed increment fails the whole create.
pub async fn create_employee(
    state: &Arc<AppState>,
    req: CreateEmployeeRequest,
) -> Result<EmployeeDto, ApiError> {
    info!(email = %req.email, "creating employee");

    let problems = validate_new_employee(&req);
    if !problems.is_empty() {
        return Err(ApiError::validation(problems.join("; ")));
    }

    if state.db.find_by_email(&req.email).await?.is_some() {
        warn!(email = %req.email, "employee email already exists");
        return Err(ApiError::duplicate("Employee email already exists"));
    }

    let sequence = state
        .db
        .next_sequence(EMPLOYEE_ID_COUNTER)
        .await
        .map_err(|e| {
            warn!(error = %e, "sequence fetch failed, aborting create");
            ApiError::CounterUnavailable
        })?;
    let employee_id = format_employee_id(sequence);
    info!(employee_id = %employee_id, "generated employee id");

    let now = now_ms();
    let key = new_ulid();
    let row = state
        .db
        .create_employee(
            &key,
            EmployeeContent {
                employee_id,
                full_name: req.full_name,
                email: req.email,
                department: req.department,
                created_at_ms: now,
                last_modified_at_ms: now,
            },
        )
        .await
        .map_err(|e| {
            warn!(error = %e, "employee insert failed");
            ApiError::from(e)
        })?;

    Ok(to_dto(row))
}

/// Applies a partial update to the employee with the given external id.
/// Only fields present in the patch are touched.
pub async fn update_employee(
    state: &Arc<AppState>,
    employee_id: &str,
    patch: UpdateEmployeeRequest,
) -> Result<EmployeeDto, ApiError> {
    info!(employee_id = %employee_id, "updating employee");

    let existing = state
        .db
        .find_by_employee_id(employee_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Employee not found with ID: {employee_id}")))?;

    let mut merge = serde_json::Map::new();

    if let Some(full_name) = patch.full_name {
        if let Some(problem) = check_full_name(&full_name) {
            return Err(ApiError::validation(problem));
        }
        merge.insert("full_name".to_string(), json!(full_name));
    }

    if let Some(email) = patch.email {
        if !is_valid_email(&email) {
            return Err(ApiError::validation("email must be a valid email address"));
        }
        if email != existing.email && state.db.find_by_email(&email).await?.is_some() {
            warn!(employee_id = %employee_id, "employee email already exists");
            return Err(ApiError::duplicate("Employee email already exists"));
        }
        merge.insert("email".to_string(), json!(email));
    }

    if let Some(department) = patch.department {
        merge.insert("department".to_string(), json!(department));
    }

    merge.insert("last_modified_at_ms".to_string(), json!(now_ms()));

    let key = existing.id.key().to_string();
    let updated = state
        .db
        .update_employee(&key, serde_json::Value::Object(merge))
        .await
        .map_err(|e| {
            warn!(error = %e, employee_id = %employee_id, "employee update failed");
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::not_found(format!("Employee not found with ID: {employee_id}")))?;

    info!(employee_id = %employee_id, "employee updated");
    Ok(to_dto(updated))
}

/// Deletes the employee with the given external id, returning the removed
/// record's snapshot.
pub async fn delete_employee(
    state: &Arc<AppState>,
    employee_id: &str,
) -> Result<EmployeeDto, ApiError> {
    info!(employee_id = %employee_id, "deleting employee");

    let existing = state
        .db
        .find_by_employee_id(employee_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Employee not found with ID: {employee_id}")))?;

    let key = existing.id.key().to_string();
    let deleted = state.db.delete_employee(&key).await?.unwrap_or(existing);

    info!(employee_id = %employee_id, "employee deleted");
    Ok(to_dto(deleted))
}

/// Reads one employee by internal storage key.
pub async fn get_employee_by_key(state: &Arc<AppState>, id: &str) -> Result<EmployeeDto, ApiError> {
    let row = state
        .db
        .find_by_key(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No employee found for the given id: {id}")))?;
    Ok(to_dto(row))
}

/// Reads one employee by external id.
pub async fn get_employee_by_employee_id(
    state: &Arc<AppState>,
    employee_id: &str,
) -> Result<EmployeeDto, ApiError> {
    let row = state
        .db
        .find_by_employee_id(employee_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!("No employee found for the given employee id: {employee_id}"))
        })?;
    Ok(to_dto(row))
}

/// One page of the full listing. An empty page is reported as not found.
pub async fn list_employees(
    state: &Arc<AppState>,
    page: Option<u32>,
    size: Option<u32>,
) -> Result<Paged<EmployeeDto>, ApiError> {
    let (page, size) = normalize_page(page, size);
    let start = i64::from(page) * i64::from(size);

    let (rows, total) = state.db.list_employees(start, i64::from(size)).await?;
    if rows.is_empty() {
        return Err(ApiError::not_found("No employees found"));
    }

    Ok(Paged {
        items: rows.into_iter().map(to_dto).collect(),
        page,
        size,
        total,
    })
}

/// Case-insensitive substring search by name and/or department. At least one
/// filter must be present.
pub async fn search_employees(
    state: &Arc<AppState>,
    full_name: Option<String>,
    department: Option<String>,
    page: Option<u32>,
    size: Option<u32>,
) -> Result<Paged<EmployeeDto>, ApiError> {
    let full_name = full_name.filter(|s| !s.trim().is_empty());
    let department = department.filter(|s| !s.trim().is_empty());
    if full_name.is_none() && department.is_none() {
        return Err(ApiError::validation(
            "At least one of fullName or department must be provided",
        ));
    }

    let (page, size) = normalize_page(page, size);
    let start = i64::from(page) * i64::from(size);

    let (rows, total) = state
        .db
        .search_employees(full_name, department, start, i64::from(size))
        .await?;
    if rows.is_empty() {
        return Err(ApiError::not_found(
            "No employees found matching the given name or department",
        ));
    }

    Ok(Paged {
        items: rows.into_iter().map(to_dto).collect(),
        page,
        size,
        total,
    })
}
