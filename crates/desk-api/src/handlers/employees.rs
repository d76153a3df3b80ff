//! Employees API handlers

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use desk_core::traits::Id;
use desk_models::{EmployeeAttributes, EmployeePatch, EmployeeReplacement};

use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, AppState};

/// List all employees
///
/// GET /api/employees
pub async fn list_employees(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let employees = state.services.employees.list().await?;
    Ok(Json(employees))
}

/// Get a single employee
///
/// GET /api/employees/:id
pub async fn get_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<impl IntoResponse> {
    let employee = state.services.employees.get(id).await?;
    Ok(Json(employee))
}

/// Create a new employee
///
/// POST /api/employees
pub async fn create_employee(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EmployeeAttributes>,
) -> ApiResult<impl IntoResponse> {
    let employee = state.services.employees.create(body).await?;
    let location = format!("/api/employees/{}", employee.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(employee)))
}

/// Replace an employee; the id travels in the body
///
/// PUT /api/employees
pub async fn update_employee(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EmployeeReplacement>,
) -> ApiResult<impl IntoResponse> {
    let employee = state.services.employees.update(body).await?;
    Ok(Json(employee))
}

/// Partially update an employee
///
/// PATCH /api/employees/:id
pub async fn edit_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
    ApiJson(body): ApiJson<EmployeePatch>,
) -> ApiResult<impl IntoResponse> {
    let employee = state.services.employees.edit(id, body).await?;
    Ok(Json(employee))
}

/// Delete an employee without issues
///
/// DELETE /api/employees/:id
pub async fn delete_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<impl IntoResponse> {
    state.services.employees.remove(id).await?;
    Ok(StatusCode::OK)
}
