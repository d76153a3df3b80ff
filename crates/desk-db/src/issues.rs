//! Issue repository
//!
//! Database operations for issues.

use async_trait::async_trait;
use desk_core::traits::{Entity, Id};
use desk_models::{Employee, Issue};
use sqlx::{FromRow, PgPool};

use crate::repository::{RepositoryError, RepositoryResult};

/// Issue joined with the name fields of its employee, for search
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct IssueSearchRow {
    pub id: Id,
    pub title: String,
    pub description: Option<String>,
    pub employee_id: Id,
    pub employee_name: String,
    pub employee_last_name: String,
}

impl IssueSearchRow {
    pub fn into_issue(self) -> Issue {
        Issue {
            id: self.id,
            title: self.title,
            description: self.description,
            employee_id: self.employee_id,
        }
    }
}

/// DTO for creating an issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssueDto {
    pub title: String,
    pub description: Option<String>,
    pub employee_id: Id,
}

/// DTO for rewriting an issue's editable fields. The employee never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateIssueDto {
    pub title: String,
    pub description: Option<String>,
}

/// Issue storage
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait IssueStore: Send + Sync {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Issue>>;

    async fn find_all(&self) -> RepositoryResult<Vec<Issue>>;

    async fn find_by_employee(&self, employee_id: Id) -> RepositoryResult<Vec<Issue>>;

    async fn count_by_employee(&self, employee_id: Id) -> RepositoryResult<i64>;

    /// Every issue with its employee's names
    async fn find_all_with_employee(&self) -> RepositoryResult<Vec<IssueSearchRow>>;

    async fn create(&self, dto: CreateIssueDto) -> RepositoryResult<Issue>;

    async fn update(&self, id: Id, dto: UpdateIssueDto) -> RepositoryResult<Issue>;

    /// Delete an issue together with its comments
    async fn delete(&self, id: Id) -> RepositoryResult<()>;
}

/// PostgreSQL issue store
pub struct PgIssueStore {
    pool: PgPool,
}

impl PgIssueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IssueStore for PgIssueStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Issue>> {
        let row = sqlx::query_as::<_, Issue>(
            r#"
            SELECT id, title, description, employee_id
            FROM issues
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Issue>> {
        let rows = sqlx::query_as::<_, Issue>(
            r#"
            SELECT id, title, description, employee_id
            FROM issues
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_employee(&self, employee_id: Id) -> RepositoryResult<Vec<Issue>> {
        let rows = sqlx::query_as::<_, Issue>(
            r#"
            SELECT id, title, description, employee_id
            FROM issues
            WHERE employee_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count_by_employee(&self, employee_id: Id) -> RepositoryResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM issues WHERE employee_id = $1")
                .bind(employee_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn find_all_with_employee(&self) -> RepositoryResult<Vec<IssueSearchRow>> {
        let rows = sqlx::query_as::<_, IssueSearchRow>(
            r#"
            SELECT i.id, i.title, i.description, i.employee_id,
                   e.name AS employee_name, e.last_name AS employee_last_name
            FROM issues i
            INNER JOIN employees e ON e.id = i.employee_id
            ORDER BY i.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, dto: CreateIssueDto) -> RepositoryResult<Issue> {
        let row = sqlx::query_as::<_, Issue>(
            r#"
            INSERT INTO issues (title, description, employee_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, employee_id
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.employee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, Employee::TYPE_NAME, dto.employee_id))?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateIssueDto) -> RepositoryResult<Issue> {
        let row = sqlx::query_as::<_, Issue>(
            r#"
            UPDATE issues SET
                title = $1,
                description = $2
            WHERE id = $3
            RETURNING id, title, description, employee_id
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| RepositoryError::not_found(Issue::TYPE_NAME, id))
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        // comments go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(Issue::TYPE_NAME, id));
        }

        Ok(())
    }
}
