//! API error handling
//!
//! Maps service errors and request rejections to `{"error": "..."}` responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use desk_core::error::DeskError;
use serde::Serialize;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// Failure reported by a service
    Service(DeskError),
    /// Body, path or query string that could not be decoded
    BadRequest(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Service(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            // store details stay in the logs
            ApiError::Service(DeskError::Database(_)) => "Internal server error".to_string(),
            ApiError::Service(err) => err.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl From<DeskError> for ApiError {
    fn from(err: DeskError) -> Self {
        ApiError::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        match &self {
            ApiError::Service(err) if status.is_server_error() => {
                tracing::error!(error = %err, "Request failed");
            }
            ApiError::Service(DeskError::Conflict { .. }) => {
                tracing::warn!(status = status.as_u16(), %message, "Request rejected");
            }
            _ => tracing::debug!(status = status.as_u16(), %message, "Request rejected"),
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
