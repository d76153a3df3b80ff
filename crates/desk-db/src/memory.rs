//! In-memory stores
//!
//! All three tables live behind one lock so that foreign-key checks and the
//! issue-to-comments cascade happen atomically, as they would in PostgreSQL.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use desk_core::traits::{Entity, Id};
use desk_models::{Comment, Employee, Issue};
use parking_lot::RwLock;

use crate::comments::{CommentStore, CreateCommentDto};
use crate::employees::{CreateEmployeeDto, EmployeeStore, UpdateEmployeeDto, ACTIVE_ISSUES};
use crate::issues::{CreateIssueDto, IssueSearchRow, IssueStore, UpdateIssueDto};
use crate::repository::{RepositoryError, RepositoryResult};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<Id, T>,
    next_id: Id,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> Id {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Debug, Default)]
struct Tables {
    employees: Table<Employee>,
    issues: Table<Issue>,
    comments: Table<Comment>,
}

/// Shared in-memory database handing out per-entity stores
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn employees(&self) -> MemoryEmployeeStore {
        MemoryEmployeeStore {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn issues(&self) -> MemoryIssueStore {
        MemoryIssueStore {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn comments(&self) -> MemoryCommentStore {
        MemoryCommentStore {
            tables: Arc::clone(&self.tables),
        }
    }
}

pub struct MemoryEmployeeStore {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Employee>> {
        Ok(self.tables.read().employees.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Employee>> {
        Ok(self.tables.read().employees.rows.values().cloned().collect())
    }

    async fn create(&self, dto: CreateEmployeeDto) -> RepositoryResult<Employee> {
        let mut tables = self.tables.write();
        let employee = Employee {
            id: tables.employees.next_id(),
            name: dto.name,
            last_name: dto.last_name,
            created_at: Utc::now(),
        };
        tables.employees.rows.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn update(&self, id: Id, dto: UpdateEmployeeDto) -> RepositoryResult<Employee> {
        let mut tables = self.tables.write();
        let employee = tables
            .employees
            .rows
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(Employee::TYPE_NAME, id))?;

        employee.name = dto.name;
        employee.last_name = dto.last_name;
        Ok(employee.clone())
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let mut tables = self.tables.write();
        if !tables.employees.rows.contains_key(&id) {
            return Err(RepositoryError::not_found(Employee::TYPE_NAME, id));
        }
        if tables.issues.rows.values().any(|issue| issue.employee_id == id) {
            return Err(RepositoryError::Conflict(ACTIVE_ISSUES.to_string()));
        }

        tables.employees.rows.remove(&id);
        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        Ok(self.tables.read().employees.rows.contains_key(&id))
    }
}

pub struct MemoryIssueStore {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Issue>> {
        Ok(self.tables.read().issues.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Issue>> {
        Ok(self.tables.read().issues.rows.values().cloned().collect())
    }

    async fn find_by_employee(&self, employee_id: Id) -> RepositoryResult<Vec<Issue>> {
        Ok(self
            .tables
            .read()
            .issues
            .rows
            .values()
            .filter(|issue| issue.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn count_by_employee(&self, employee_id: Id) -> RepositoryResult<i64> {
        let count = self
            .tables
            .read()
            .issues
            .rows
            .values()
            .filter(|issue| issue.employee_id == employee_id)
            .count();
        Ok(count as i64)
    }

    async fn find_all_with_employee(&self) -> RepositoryResult<Vec<IssueSearchRow>> {
        let tables = self.tables.read();
        let rows = tables
            .issues
            .rows
            .values()
            .filter_map(|issue| {
                let employee = tables.employees.rows.get(&issue.employee_id)?;
                Some(IssueSearchRow {
                    id: issue.id,
                    title: issue.title.clone(),
                    description: issue.description.clone(),
                    employee_id: issue.employee_id,
                    employee_name: employee.name.clone(),
                    employee_last_name: employee.last_name.clone(),
                })
            })
            .collect();
        Ok(rows)
    }

    async fn create(&self, dto: CreateIssueDto) -> RepositoryResult<Issue> {
        let mut tables = self.tables.write();
        if !tables.employees.rows.contains_key(&dto.employee_id) {
            return Err(RepositoryError::not_found(Employee::TYPE_NAME, dto.employee_id));
        }

        let issue = Issue {
            id: tables.issues.next_id(),
            title: dto.title,
            description: dto.description,
            employee_id: dto.employee_id,
        };
        tables.issues.rows.insert(issue.id, issue.clone());
        Ok(issue)
    }

    async fn update(&self, id: Id, dto: UpdateIssueDto) -> RepositoryResult<Issue> {
        let mut tables = self.tables.write();
        let issue = tables
            .issues
            .rows
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found(Issue::TYPE_NAME, id))?;

        issue.title = dto.title;
        issue.description = dto.description;
        Ok(issue.clone())
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let mut tables = self.tables.write();
        if tables.issues.rows.remove(&id).is_none() {
            return Err(RepositoryError::not_found(Issue::TYPE_NAME, id));
        }

        tables.comments.rows.retain(|_, comment| comment.issue_id != id);
        Ok(())
    }
}

pub struct MemoryCommentStore {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Comment>> {
        Ok(self.tables.read().comments.rows.get(&id).cloned())
    }

    async fn find_by_issue(&self, issue_id: Id) -> RepositoryResult<Vec<Comment>> {
        Ok(self
            .tables
            .read()
            .comments
            .rows
            .values()
            .filter(|comment| comment.issue_id == issue_id)
            .cloned()
            .collect())
    }

    async fn create(&self, dto: CreateCommentDto) -> RepositoryResult<Comment> {
        let mut tables = self.tables.write();
        if !tables.issues.rows.contains_key(&dto.issue_id) {
            return Err(RepositoryError::not_found(Issue::TYPE_NAME, dto.issue_id));
        }

        let comment = Comment {
            id: tables.comments.next_id(),
            text: dto.text,
            likes: dto.likes,
            issue_id: dto.issue_id,
        };
        tables.comments.rows.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let mut tables = self.tables.write();
        match tables.comments.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::not_found(Comment::TYPE_NAME, id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed(db: &MemoryDatabase) -> (Employee, Issue) {
        let employee = db
            .employees()
            .create(CreateEmployeeDto {
                name: "Ivan".to_string(),
                last_name: "Ivanov".to_string(),
            })
            .await
            .unwrap();
        let issue = db
            .issues()
            .create(CreateIssueDto {
                title: "Title".to_string(),
                description: None,
                employee_id: employee.id,
            })
            .await
            .unwrap();
        (employee, issue)
    }

    #[tokio::test]
    async fn test_ids_are_assigned_sequentially() {
        let db = MemoryDatabase::new();
        let (employee, issue) = seed(&db).await;
        assert_eq!(employee.id, 1);
        assert_eq!(issue.id, 1);

        let second = db
            .employees()
            .create(CreateEmployeeDto {
                name: "Petr".to_string(),
                last_name: "Petrov".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_issue_requires_existing_employee() {
        let db = MemoryDatabase::new();
        let result = db
            .issues()
            .create(CreateIssueDto {
                title: "Title".to_string(),
                description: None,
                employee_id: 42,
            })
            .await;
        assert!(matches!(
            result,
            Err(RepositoryError::NotFound { entity: "Employee", id: 42 })
        ));
    }

    #[tokio::test]
    async fn test_comment_requires_existing_issue() {
        let db = MemoryDatabase::new();
        let result = db
            .comments()
            .create(CreateCommentDto {
                text: "Text".to_string(),
                likes: 0,
                issue_id: 7,
            })
            .await;
        assert!(matches!(
            result,
            Err(RepositoryError::NotFound { entity: "Issue", id: 7 })
        ));
    }

    #[tokio::test]
    async fn test_employee_delete_blocked_by_issues() {
        let db = MemoryDatabase::new();
        let (employee, issue) = seed(&db).await;

        let result = db.employees().delete(employee.id).await;
        assert!(matches!(result, Err(RepositoryError::Conflict(msg)) if msg == ACTIVE_ISSUES));
        assert!(db.employees().exists(employee.id).await.unwrap());

        db.issues().delete(issue.id).await.unwrap();
        db.employees().delete(employee.id).await.unwrap();
        assert!(!db.employees().exists(employee.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_issue_delete_cascades_to_comments() {
        let db = MemoryDatabase::new();
        let (_, issue) = seed(&db).await;
        let comment = db
            .comments()
            .create(CreateCommentDto {
                text: "Text".to_string(),
                likes: 0,
                issue_id: issue.id,
            })
            .await
            .unwrap();

        db.issues().delete(issue.id).await.unwrap();

        assert!(db.comments().find_by_id(comment.id).await.unwrap().is_none());
        assert!(db.comments().find_by_issue(issue.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = MemoryDatabase::new();
        assert!(matches!(
            db.comments().delete(9).await,
            Err(RepositoryError::NotFound { entity: "Comment", id: 9 })
        ));
        assert!(matches!(
            db.issues().delete(9).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_identity_and_timestamp() {
        let db = MemoryDatabase::new();
        let (employee, _) = seed(&db).await;

        let updated = db
            .employees()
            .update(
                employee.id,
                UpdateEmployeeDto {
                    name: "Petr".to_string(),
                    last_name: "Petrov".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, employee.id);
        assert_eq!(updated.created_at, employee.created_at);
        assert_eq!(updated.full_name(), "Petr Petrov");
    }

    #[tokio::test]
    async fn test_search_rows_carry_employee_names() {
        let db = MemoryDatabase::new();
        let (_, issue) = seed(&db).await;

        let rows = db.issues().find_all_with_employee().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_last_name, "Ivanov");
        assert_eq!(rows[0].clone().into_issue(), issue);
    }
}
