//! Employee repository
//!
//! Database operations for employees.

use async_trait::async_trait;
use desk_core::traits::{Entity, Id};
use desk_models::Employee;
use sqlx::PgPool;

use crate::repository::{RepositoryError, RepositoryResult};

pub const ACTIVE_ISSUES: &str = "The employee has active issues";

/// DTO for creating an employee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployeeDto {
    pub name: String,
    pub last_name: String,
}

/// DTO for replacing an employee's writable fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEmployeeDto {
    pub name: String,
    pub last_name: String,
}

/// Employee storage
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Employee>>;

    async fn find_all(&self) -> RepositoryResult<Vec<Employee>>;

    /// Insert a new employee; id and `created_at` are assigned by the store
    async fn create(&self, dto: CreateEmployeeDto) -> RepositoryResult<Employee>;

    async fn update(&self, id: Id, dto: UpdateEmployeeDto) -> RepositoryResult<Employee>;

    /// Delete an employee. Fails with a conflict while it still owns issues.
    async fn delete(&self, id: Id) -> RepositoryResult<()>;

    async fn exists(&self, id: Id) -> RepositoryResult<bool>;
}

/// PostgreSQL employee store
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Employee>> {
        let row = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, last_name, created_at
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, last_name, created_at
            FROM employees
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, dto: CreateEmployeeDto) -> RepositoryResult<Employee> {
        let row = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (name, last_name, created_at)
            VALUES ($1, $2, NOW())
            RETURNING id, name, last_name, created_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: Id, dto: UpdateEmployeeDto) -> RepositoryResult<Employee> {
        let row = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees SET
                name = $1,
                last_name = $2
            WHERE id = $3
            RETURNING id, name, last_name, created_at
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.last_name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| RepositoryError::not_found(Employee::TYPE_NAME, id))
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::from_write(e, ACTIVE_ISSUES))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(Employee::TYPE_NAME, id));
        }

        Ok(())
    }

    async fn exists(&self, id: Id) -> RepositoryResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
