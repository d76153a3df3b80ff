//! Comment repository
//!
//! Database operations for comments.

use async_trait::async_trait;
use desk_core::traits::{Entity, Id};
use desk_models::{Comment, Issue};
use sqlx::PgPool;

use crate::repository::{RepositoryError, RepositoryResult};

/// DTO for creating a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentDto {
    pub text: String,
    pub likes: i32,
    pub issue_id: Id,
}

/// Comment storage
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Comment>>;

    async fn find_by_issue(&self, issue_id: Id) -> RepositoryResult<Vec<Comment>>;

    async fn create(&self, dto: CreateCommentDto) -> RepositoryResult<Comment>;

    async fn delete(&self, id: Id) -> RepositoryResult<()>;
}

/// PostgreSQL comment store
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn find_by_id(&self, id: Id) -> RepositoryResult<Option<Comment>> {
        let row = sqlx::query_as::<_, Comment>(
            "SELECT id, text, likes, issue_id FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_issue(&self, issue_id: Id) -> RepositoryResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, text, likes, issue_id
            FROM comments
            WHERE issue_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(issue_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, dto: CreateCommentDto) -> RepositoryResult<Comment> {
        let row = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (text, likes, issue_id)
            VALUES ($1, $2, $3)
            RETURNING id, text, likes, issue_id
            "#,
        )
        .bind(&dto.text)
        .bind(dto.likes)
        .bind(dto.issue_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, Issue::TYPE_NAME, dto.issue_id))?;

        Ok(row)
    }

    async fn delete(&self, id: Id) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(Comment::TYPE_NAME, id));
        }

        Ok(())
    }
}
