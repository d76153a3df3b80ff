//! Comments API handlers

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use desk_core::traits::Id;
use desk_models::CommentAttributes;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, AppState};

/// Comment body; the parent issue is carried alongside the comment fields
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(rename = "issueId")]
    pub issue_id: Option<Id>,

    #[serde(flatten)]
    pub comment: CommentAttributes,
}

/// Create a comment on an issue
///
/// POST /api/comments
pub async fn create_comment(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateCommentRequest>,
) -> ApiResult<impl IntoResponse> {
    let comment = state
        .services
        .comments
        .create(body.issue_id, body.comment)
        .await?;
    let location = format!("/api/comments/{}", comment.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(comment)))
}

/// Comments on one issue
///
/// GET /api/comments/issue/:id
pub async fn list_issue_comments(
    State(state): State<AppState>,
    ApiPath(issue_id): ApiPath<Id>,
) -> ApiResult<impl IntoResponse> {
    let comments = state.services.comments.list_by_issue(issue_id).await?;
    Ok(Json(comments))
}

/// Delete a comment
///
/// DELETE /api/comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Id>,
) -> ApiResult<impl IntoResponse> {
    state.services.comments.remove(id).await?;
    Ok(StatusCode::OK)
}
