//! Result type aliases

use crate::error::{DeskError, ValidationError};

/// Standard Result type for Desk operations
pub type DeskResult<T> = Result<T, DeskError>;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationError>;
