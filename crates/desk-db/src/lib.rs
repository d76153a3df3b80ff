//! # desk-db
//!
//! Storage layer for Desk.
//!
//! This crate provides:
//!
//! - Connection pool management and embedded migrations (PostgreSQL via SQLx)
//! - Store traits for employees, issues and comments
//! - PostgreSQL and in-memory implementations of those traits
//!
//! ## Example
//!
//! ```ignore
//! use desk_db::{Database, Stores};
//!
//! let db = Database::connect(&url, &config.database).await?;
//! db.migrate().await?;
//!
//! let stores = Stores::postgres(db.pool().clone());
//! let employee = stores.employees.find_by_id(1).await?;
//! ```

use std::sync::Arc;

use sqlx::PgPool;

pub mod pool;
pub mod repository;
pub mod employees;
pub mod issues;
pub mod comments;
pub mod memory;

// Re-exports
pub use pool::{Database, PoolStats};
pub use repository::{RepositoryError, RepositoryResult};
pub use employees::{CreateEmployeeDto, EmployeeStore, PgEmployeeStore, UpdateEmployeeDto};
pub use issues::{CreateIssueDto, IssueSearchRow, IssueStore, PgIssueStore, UpdateIssueDto};
pub use comments::{CommentStore, CreateCommentDto, PgCommentStore};
pub use memory::MemoryDatabase;

#[cfg(any(test, feature = "mock"))]
pub use comments::MockCommentStore;
#[cfg(any(test, feature = "mock"))]
pub use employees::MockEmployeeStore;
#[cfg(any(test, feature = "mock"))]
pub use issues::MockIssueStore;

/// The set of stores a running service works against
#[derive(Clone)]
pub struct Stores {
    pub employees: Arc<dyn EmployeeStore>,
    pub issues: Arc<dyn IssueStore>,
    pub comments: Arc<dyn CommentStore>,
}

impl Stores {
    /// Stores backed by a PostgreSQL pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            employees: Arc::new(PgEmployeeStore::new(pool.clone())),
            issues: Arc::new(PgIssueStore::new(pool.clone())),
            comments: Arc::new(PgCommentStore::new(pool)),
        }
    }

    /// Stores sharing one fresh in-memory database
    pub fn in_memory() -> Self {
        let db = MemoryDatabase::new();
        Self {
            employees: Arc::new(db.employees()),
            issues: Arc::new(db.issues()),
            comments: Arc::new(db.comments()),
        }
    }
}
