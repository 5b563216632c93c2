//! HTTP surface: axum handlers translating requests into operation calls and
//! outcomes into response envelopes.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use employee_core::api::{ApiEnvelope, CreateEmployeeRequest, UpdateEmployeeRequest};
use serde::Deserialize;
use tracing::info;

use crate::db::Db;
use crate::error::ApiError;
use crate::service;

pub struct AppState {
    pub db: Db,
}

impl AppState {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/employees", post(create_employee).get(read_employees))
        .route("/employees/search", get(search_employees))
        .route(
            "/employees/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub employee_id: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub full_name: Option<String>,
    pub department: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

fn envelope<T>(status: StatusCode, message: &str, data: T) -> (StatusCode, Json<ApiEnvelope<T>>) {
    (
        status,
        Json(ApiEnvelope::new(message, Some(data), status.as_u16())),
    )
}

pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let dto = service::create_employee(&state, req).await?;
    info!(employee_id = %dto.employee_id, "new employee created");
    Ok(envelope(
        StatusCode::CREATED,
        "Employee created successfully.",
        dto,
    ))
}

pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateEmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let dto = service::update_employee(&state, &id, patch).await?;
    Ok(envelope(
        StatusCode::OK,
        "Employee details updated successfully.",
        dto,
    ))
}

pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let dto = service::delete_employee(&state, &id).await?;
    Ok(envelope(
        StatusCode::OK,
        "Employee details deleted successfully.",
        dto,
    ))
}

/// Read by internal storage key.
pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let dto = service::get_employee_by_key(&state, &id).await?;
    Ok(envelope(
        StatusCode::OK,
        "Employee retrieved successfully.",
        dto,
    ))
}

/// Read by external id when `employeeId` is given, else a paginated listing.
pub async fn read_employees(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    if let Some(employee_id) = params.employee_id {
        let dto = service::get_employee_by_employee_id(&state, &employee_id).await?;
        return Ok(envelope(StatusCode::OK, "Employee retrieved successfully.", dto).into_response());
    }

    let page = service::list_employees(&state, params.page, params.size).await?;
    Ok(envelope(StatusCode::OK, "Employees retrieved successfully.", page).into_response())
}

pub async fn search_employees(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = service::search_employees(
        &state,
        params.full_name,
        params.department,
        params.page,
        params.size,
    )
    .await?;
    Ok(envelope(
        StatusCode::OK,
        "Employees retrieved successfully.",
        page,
    ))
}
