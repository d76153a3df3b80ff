//! Employee contracts

use desk_core::error::ValidationError;
use desk_core::types::Patch;
use desk_models::{EmployeeAttributes, EmployeePatch};

use crate::base::{check_lengths, Contract, FieldName, ValidationResult};

pub const NAME_AND_LAST_NAME_REQUIRED: &str = "The 'name' and 'lastName' fields is required";

const FIELDS: &[FieldName] = &[("name", "name"), ("last_name", "lastName")];

/// Contract for create and full replacement
pub struct EmployeeContract;

impl Contract<EmployeeAttributes> for EmployeeContract {
    fn validate(&self, entity: &EmployeeAttributes) -> ValidationResult {
        if entity.name.is_none() || entity.last_name.is_none() {
            return Err(ValidationError::new("name", NAME_AND_LAST_NAME_REQUIRED));
        }

        check_lengths(entity, FIELDS)
    }
}

/// Contract for partial updates.
///
/// Only rejects explicit nulls; lengths are checked on the merged
/// attributes with [`EmployeeContract`].
pub struct EditEmployeeContract;

impl Contract<EmployeePatch> for EditEmployeeContract {
    fn validate(&self, patch: &EmployeePatch) -> ValidationResult {
        if matches!(patch.name, Patch::Null) {
            return Err(ValidationError::required("name"));
        }
        if matches!(patch.last_name, Patch::Null) {
            return Err(ValidationError::required("lastName"));
        }
        Ok(())
    }
}
