//! Issue contracts

use desk_core::error::ValidationError;
use desk_core::types::Patch;
use desk_models::{IssueAttributes, IssuePatch};

use crate::base::{check_lengths, require, Contract, FieldName, ValidationResult};

const FIELDS: &[FieldName] = &[("title", "title"), ("description", "description")];

/// Contract for creating an issue and for re-validating an edited one
pub struct IssueContract;

impl Contract<IssueAttributes> for IssueContract {
    fn validate(&self, entity: &IssueAttributes) -> ValidationResult {
        require(entity.title.as_ref(), "title")?;
        require(entity.employee_id.as_ref(), "employeeId")?;

        check_lengths(entity, FIELDS)
    }
}

/// Contract for partial updates. A null description is allowed and clears it.
pub struct EditIssueContract;

impl Contract<IssuePatch> for EditIssueContract {
    fn validate(&self, patch: &IssuePatch) -> ValidationResult {
        if matches!(patch.title, Patch::Null) {
            return Err(ValidationError::required("title"));
        }
        Ok(())
    }
}
