//! Issues API handlers

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use desk_core::traits::Id;
use desk_models::{IssueAttributes, IssuePatch};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ApiQuery, AppState};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// List all issues
///
/// GET /api/issues
pub async fn list_issues(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let issues = state.services.issues.list().await?;
    Ok(Json(issues))
}

/// Get a single issue
///
/// GET /api/issues/:id
pub async fn get_issue(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<impl IntoResponse> {
    let issue = state.services.issues.get(id).await?;
    Ok(Json(issue))
}

/// Issues owned by one employee
///
/// GET /api/issues/employee/:id
pub async fn list_employee_issues(
    State(state): State<AppState>,
    ApiPath(employee_id): ApiPath<Id>,
) -> ApiResult<impl IntoResponse> {
    let issues = state.services.issues.list_by_employee(employee_id).await?;
    Ok(Json(issues))
}

/// Case-insensitive search over issues and their employees
///
/// GET /api/issues/search?q=
pub async fn search_issues(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<impl IntoResponse> {
    let issues = state.services.issues.search(params.q.as_deref()).await?;
    Ok(Json(issues))
}

/// Create a new issue
///
/// POST /api/issues
pub async fn create_issue(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<IssueAttributes>,
) -> ApiResult<impl IntoResponse> {
    let issue = state.services.issues.create(body).await?;
    let location = format!("/api/issues/{}", issue.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(issue)))
}

/// Partially update an issue
///
/// PATCH /api/issues/:id
pub async fn edit_issue(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
    ApiJson(body): ApiJson<IssuePatch>,
) -> ApiResult<impl IntoResponse> {
    let issue = state.services.issues.edit(id, body).await?;
    Ok(Json(issue))
}

/// Delete an issue and its comments
///
/// DELETE /api/issues/:id
pub async fn delete_issue(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<impl IntoResponse> {
    state.services.issues.remove(id).await?;
    Ok(StatusCode::OK)
}
