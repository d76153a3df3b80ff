//! Issue service

use std::sync::Arc;

use desk_contracts::{Contract, EditIssueContract, IssueContract};
use desk_core::error::{DeskError, ValidationError};
use desk_core::result::DeskResult;
use desk_core::traits::{Entity, Id};
use desk_db::{CreateIssueDto, EmployeeStore, IssueSearchRow, IssueStore, UpdateIssueDto};
use desk_models::{Employee, Issue, IssueAttributes, IssuePatch};

/// Issue operations, including search over issues and their employees
#[derive(Clone)]
pub struct IssueService {
    employees: Arc<dyn EmployeeStore>,
    issues: Arc<dyn IssueStore>,
}

impl IssueService {
    pub fn new(employees: Arc<dyn EmployeeStore>, issues: Arc<dyn IssueStore>) -> Self {
        Self { employees, issues }
    }

    /// Validate and persist a new issue owned by an existing employee
    pub async fn create(&self, attributes: IssueAttributes) -> DeskResult<Issue> {
        IssueContract.validate(&attributes)?;

        let (Some(title), Some(employee_id)) = (attributes.title, attributes.employee_id) else {
            return Err(ValidationError::required("title").into());
        };
        self.ensure_employee(employee_id).await?;

        let issue = self
            .issues
            .create(CreateIssueDto {
                title,
                description: attributes.description,
                employee_id,
            })
            .await?;

        tracing::info!(issue_id = issue.id, employee_id, "Issue created");
        Ok(issue)
    }

    pub async fn get(&self, id: Id) -> DeskResult<Issue> {
        tracing::debug!(issue_id = id, "Fetching issue");
        self.issues
            .find_by_id(id)
            .await?
            .ok_or_else(|| DeskError::not_found(Issue::TYPE_NAME, id))
    }

    pub async fn list(&self) -> DeskResult<Vec<Issue>> {
        Ok(self.issues.find_all().await?)
    }

    pub async fn list_by_employee(&self, employee_id: Id) -> DeskResult<Vec<Issue>> {
        self.ensure_employee(employee_id).await?;
        Ok(self.issues.find_by_employee(employee_id).await?)
    }

    /// Case-insensitive substring search over title, description and the
    /// employee's name fields. An empty query matches every issue.
    pub async fn search(&self, query: Option<&str>) -> DeskResult<Vec<Issue>> {
        let query = query.ok_or_else(|| ValidationError::required_param("q"))?;
        let needle = query.to_lowercase();

        let rows = self.issues.find_all_with_employee().await?;
        let total = rows.len();
        let matches: Vec<Issue> = rows
            .into_iter()
            .filter(|row| matches_query(row, &needle))
            .map(IssueSearchRow::into_issue)
            .collect();

        tracing::debug!(query, total, matched = matches.len(), "Issue search");
        Ok(matches)
    }

    /// Apply only the fields present in `patch`
    pub async fn edit(&self, id: Id, patch: IssuePatch) -> DeskResult<Issue> {
        let existing = self.get(id).await?;
        EditIssueContract.validate(&patch)?;

        let mut attributes = IssueAttributes::from(&existing);
        patch.apply_to(&mut attributes);
        IssueContract.validate(&attributes)?;

        let Some(title) = attributes.title else {
            return Err(ValidationError::required("title").into());
        };

        let issue = self
            .issues
            .update(
                id,
                UpdateIssueDto {
                    title,
                    description: attributes.description,
                },
            )
            .await?;

        tracing::info!(issue_id = id, "Issue edited");
        Ok(issue)
    }

    /// Delete an issue and, with it, its comments
    pub async fn remove(&self, id: Id) -> DeskResult<()> {
        self.get(id).await?;
        self.issues.delete(id).await?;
        tracing::info!(issue_id = id, "Issue deleted");
        Ok(())
    }

    async fn ensure_employee(&self, employee_id: Id) -> DeskResult<()> {
        if self.employees.exists(employee_id).await? {
            Ok(())
        } else {
            Err(DeskError::not_found(Employee::TYPE_NAME, employee_id))
        }
    }
}

/// `needle` must already be lowercased
fn matches_query(row: &IssueSearchRow, needle: &str) -> bool {
    [
        Some(row.title.as_str()),
        row.description.as_deref(),
        Some(row.employee_name.as_str()),
        Some(row.employee_last_name.as_str()),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::types::Patch;
    use desk_db::{MockEmployeeStore, MockIssueStore, Stores};
    use desk_models::EmployeeAttributes;
    use mockall::predicate::eq;

    use crate::employees::EmployeeService;

    fn row(title: &str, description: Option<&str>, name: &str, last_name: &str) -> IssueSearchRow {
        IssueSearchRow {
            id: 1,
            title: title.to_string(),
            description: description.map(str::to_string),
            employee_id: 1,
            employee_name: name.to_string(),
            employee_last_name: last_name.to_string(),
        }
    }

    fn service(employees: MockEmployeeStore, issues: MockIssueStore) -> IssueService {
        IssueService::new(Arc::new(employees), Arc::new(issues))
    }

    async fn memory_services() -> (IssueService, Employee) {
        let stores = Stores::in_memory();
        let employees = EmployeeService::new(stores.employees.clone(), stores.issues.clone());
        let employee = employees
            .create(EmployeeAttributes::new("Ivan", "Ivanov"))
            .await
            .unwrap();
        (IssueService::new(stores.employees, stores.issues), employee)
    }

    #[test]
    fn test_matches_query_fields() {
        let row = row("Broken build", Some("CI is red"), "Ivan", "Ivanov");
        assert!(matches_query(&row, "build"));
        assert!(matches_query(&row, "ci is"));
        assert!(matches_query(&row, "ivan"));
        assert!(matches_query(&row, "nov"));
        assert!(matches_query(&row, ""));
        assert!(!matches_query(&row, "petr"));
    }

    #[test]
    fn test_matches_query_without_description() {
        let row = row("Title", None, "Ivan", "Ivanov");
        assert!(!matches_query(&row, "description"));
    }

    #[tokio::test]
    async fn test_create_and_list_by_employee() {
        let (service, employee) = memory_services().await;
        let issue = service
            .create(IssueAttributes::new("Title", employee.id))
            .await
            .unwrap();

        let issues = service.list_by_employee(employee.id).await.unwrap();
        assert_eq!(issues, vec![issue]);
    }

    #[tokio::test]
    async fn test_create_for_unknown_employee() {
        let mut employees = MockEmployeeStore::new();
        employees.expect_exists().with(eq(3)).returning(|_| Ok(false));
        let mut issues = MockIssueStore::new();
        issues.expect_create().never();
        let service = service(employees, issues);

        let err = service
            .create(IssueAttributes::new("Title", 3))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "Employee with id 3 not found");
    }

    #[tokio::test]
    async fn test_create_validation() {
        let service = service(MockEmployeeStore::new(), MockIssueStore::new());

        let err = service
            .create(IssueAttributes::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "The 'title' field is required");

        let err = service
            .create(IssueAttributes::new("Title", 1).with_description("d".repeat(1001)))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_list_by_unknown_employee() {
        let (service, _) = memory_services().await;
        let err = service.list_by_employee(99).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_employee_names() {
        let (service, employee) = memory_services().await;
        let issue = service
            .create(IssueAttributes::new("Title", employee.id))
            .await
            .unwrap();

        assert_eq!(service.search(Some("IVAN")).await.unwrap(), vec![issue.clone()]);
        assert_eq!(service.search(Some("")).await.unwrap(), vec![issue]);
        assert!(service.search(Some("petr")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let mut issues = MockIssueStore::new();
        issues.expect_find_all_with_employee().never();
        let service = service(MockEmployeeStore::new(), issues);

        let err = service.search(None).await.unwrap_err();
        assert_eq!(err.to_string(), "The 'q' param is required");
    }

    #[tokio::test]
    async fn test_edit() {
        let (service, employee) = memory_services().await;
        let issue = service
            .create(IssueAttributes::new("Title", employee.id).with_description("Description"))
            .await
            .unwrap();

        let edited = service
            .edit(
                issue.id,
                IssuePatch {
                    title: Patch::Value("New title".to_string()),
                    description: Patch::Absent,
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.title, "New title");
        assert_eq!(edited.description.as_deref(), Some("Description"));

        let edited = service
            .edit(
                issue.id,
                IssuePatch {
                    title: Patch::Absent,
                    description: Patch::Null,
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.description, None);

        let err = service
            .edit(
                issue.id,
                IssuePatch {
                    title: Patch::Null,
                    description: Patch::Absent,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "The 'title' field is required");
    }

    #[tokio::test]
    async fn test_get_and_list() {
        let (service, employee) = memory_services().await;
        assert!(service.list().await.unwrap().is_empty());

        let issue = service
            .create(IssueAttributes::new("Title", employee.id))
            .await
            .unwrap();
        assert_eq!(service.get(issue.id).await.unwrap(), issue);
        assert_eq!(service.list().await.unwrap(), vec![issue]);

        let err = service.get(99).await.unwrap_err();
        assert_eq!(err.to_string(), "Issue with id 99 not found");
    }

    #[tokio::test]
    async fn test_edit_missing_never_updates() {
        let mut issues = MockIssueStore::new();
        issues.expect_find_by_id().with(eq(9)).returning(|_| Ok(None));
        issues.expect_update().never();
        let service = service(MockEmployeeStore::new(), issues);

        let err = service
            .edit(
                9,
                IssuePatch {
                    title: Patch::Value("Title".to_string()),
                    description: Patch::Absent,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_remove_missing_never_deletes() {
        let mut issues = MockIssueStore::new();
        issues.expect_find_by_id().with(eq(4)).returning(|_| Ok(None));
        issues.expect_delete().never();
        let service = service(MockEmployeeStore::new(), issues);

        let err = service.remove(4).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
