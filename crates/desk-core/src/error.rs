//! Core error types for Desk

use thiserror::Error;

/// Core error type for all Desk operations
#[derive(Error, Debug)]
pub enum DeskError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    Conflict { message: String },

    #[error("Database error: {0}")]
    Database(String),
}

impl DeskError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        DeskError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DeskError::Conflict {
            message: message.into(),
        }
    }

    /// Shortcut for a validation failure on a single field
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        DeskError::Validation(ValidationError::new(field, message))
    }

    pub fn status_code(&self) -> u16 {
        match self {
            DeskError::Validation(_) => 400,
            DeskError::NotFound { .. } => 404,
            DeskError::Conflict { .. } => 409,
            DeskError::Database(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            DeskError::Validation(_) => "validation_failed",
            DeskError::NotFound { .. } => "not_found",
            DeskError::Conflict { .. } => "conflict",
            DeskError::Database(_) => "database_error",
        }
    }
}

/// A single rejected field or parameter.
///
/// Validation stops at the first violation, so a request never carries more
/// than one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Wire name of the offending field (`lastName`, `issueId`, ...)
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, format!("The '{}' field is required", field))
    }

    pub fn required_param(param: &'static str) -> Self {
        Self::new(param, format!("The '{}' param is required", param))
    }

    pub fn too_short(field: &'static str, min: u64) -> Self {
        let unit = if min == 1 { "character" } else { "characters" };
        Self::new(
            field,
            format!("The '{}' field must have at least {} {}", field, min, unit),
        )
    }

    pub fn too_long(field: &'static str, max: u64) -> Self {
        Self::new(
            field,
            format!(
                "The '{}' field length should be at most {} characters",
                field, max
            ),
        )
    }
}
