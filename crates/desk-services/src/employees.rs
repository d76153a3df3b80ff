//! Employee service

use std::sync::Arc;

use desk_contracts::employees::NAME_AND_LAST_NAME_REQUIRED;
use desk_contracts::{Contract, EditEmployeeContract, EmployeeContract};
use desk_core::error::{DeskError, ValidationError};
use desk_core::result::DeskResult;
use desk_core::traits::{Entity, Id};
use desk_db::employees::ACTIVE_ISSUES;
use desk_db::{CreateEmployeeDto, EmployeeStore, IssueStore, UpdateEmployeeDto};
use desk_models::{Employee, EmployeeAttributes, EmployeePatch, EmployeeReplacement};

/// Create, read, update and delete employees
#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeStore>,
    issues: Arc<dyn IssueStore>,
}

impl EmployeeService {
    pub fn new(employees: Arc<dyn EmployeeStore>, issues: Arc<dyn IssueStore>) -> Self {
        Self { employees, issues }
    }

    /// Validate and persist a new employee. Any client-supplied id is ignored.
    pub async fn create(&self, attributes: EmployeeAttributes) -> DeskResult<Employee> {
        let (name, last_name) = validated_names(attributes)?;

        let employee = self
            .employees
            .create(CreateEmployeeDto { name, last_name })
            .await?;

        tracing::info!(employee_id = employee.id, "Employee created");
        Ok(employee)
    }

    pub async fn get(&self, id: Id) -> DeskResult<Employee> {
        tracing::debug!(employee_id = id, "Fetching employee");
        self.employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| DeskError::not_found(Employee::TYPE_NAME, id))
    }

    pub async fn list(&self) -> DeskResult<Vec<Employee>> {
        Ok(self.employees.find_all().await?)
    }

    /// Replace name and last name of the employee identified in the body
    pub async fn update(&self, replacement: EmployeeReplacement) -> DeskResult<Employee> {
        let id = replacement.id.ok_or_else(|| ValidationError::required("id"))?;
        let (name, last_name) = validated_names(replacement.attributes)?;

        if !self.employees.exists(id).await? {
            return Err(DeskError::not_found(Employee::TYPE_NAME, id));
        }

        let employee = self
            .employees
            .update(id, UpdateEmployeeDto { name, last_name })
            .await?;

        tracing::info!(employee_id = id, "Employee updated");
        Ok(employee)
    }

    /// Apply only the fields present in `patch`
    pub async fn edit(&self, id: Id, patch: EmployeePatch) -> DeskResult<Employee> {
        let existing = self.get(id).await?;
        EditEmployeeContract.validate(&patch)?;

        let mut attributes = EmployeeAttributes::from(&existing);
        patch.apply_to(&mut attributes);
        let (name, last_name) = validated_names(attributes)?;

        let employee = self
            .employees
            .update(id, UpdateEmployeeDto { name, last_name })
            .await?;

        tracing::info!(employee_id = id, "Employee edited");
        Ok(employee)
    }

    /// Delete an employee that owns no issues
    pub async fn remove(&self, id: Id) -> DeskResult<()> {
        if !self.employees.exists(id).await? {
            return Err(DeskError::not_found(Employee::TYPE_NAME, id));
        }

        let issue_count = self.issues.count_by_employee(id).await?;
        if issue_count > 0 {
            tracing::warn!(employee_id = id, issue_count, "Employee delete blocked by issues");
            return Err(DeskError::conflict(ACTIVE_ISSUES));
        }

        self.employees.delete(id).await?;
        tracing::info!(employee_id = id, "Employee deleted");
        Ok(())
    }
}

fn validated_names(attributes: EmployeeAttributes) -> DeskResult<(String, String)> {
    EmployeeContract.validate(&attributes)?;

    match (attributes.name, attributes.last_name) {
        (Some(name), Some(last_name)) => Ok((name, last_name)),
        _ => Err(ValidationError::new("name", NAME_AND_LAST_NAME_REQUIRED).into()),
    }
}
