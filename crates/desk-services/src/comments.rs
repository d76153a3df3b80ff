//! Comment service

use std::sync::Arc;

use desk_contracts::{CommentContract, Contract};
use desk_core::error::{DeskError, ValidationError};
use desk_core::result::DeskResult;
use desk_core::traits::{Entity, Id};
use desk_db::{CommentStore, CreateCommentDto, IssueStore};
use desk_models::{Comment, CommentAttributes, Issue};

#[derive(Clone)]
pub struct CommentService {
    issues: Arc<dyn IssueStore>,
    comments: Arc<dyn CommentStore>,
}

impl CommentService {
    pub fn new(issues: Arc<dyn IssueStore>, comments: Arc<dyn CommentStore>) -> Self {
        Self { issues, comments }
    }

    /// Attach a new comment to an existing issue. `likes` defaults to 0.
    pub async fn create(
        &self,
        issue_id: Option<Id>,
        attributes: CommentAttributes,
    ) -> DeskResult<Comment> {
        let issue_id = issue_id.ok_or_else(|| ValidationError::required_param("issueId"))?;
        CommentContract.validate(&attributes)?;

        let Some(text) = attributes.text else {
            return Err(ValidationError::required("text").into());
        };
        self.ensure_issue(issue_id).await?;

        let comment = self
            .comments
            .create(CreateCommentDto {
                text,
                likes: attributes.likes.unwrap_or(0),
                issue_id,
            })
            .await?;

        tracing::info!(comment_id = comment.id, issue_id, "Comment created");
        Ok(comment)
    }

    pub async fn list_by_issue(&self, issue_id: Id) -> DeskResult<Vec<Comment>> {
        self.ensure_issue(issue_id).await?;
        Ok(self.comments.find_by_issue(issue_id).await?)
    }

    pub async fn remove(&self, id: Id) -> DeskResult<()> {
        if self.comments.find_by_id(id).await?.is_none() {
            return Err(DeskError::not_found(Comment::TYPE_NAME, id));
        }

        self.comments.delete(id).await?;
        tracing::info!(comment_id = id, "Comment deleted");
        Ok(())
    }

    async fn ensure_issue(&self, issue_id: Id) -> DeskResult<()> {
        match self.issues.find_by_id(issue_id).await? {
            Some(_) => Ok(()),
            None => Err(DeskError::not_found(Issue::TYPE_NAME, issue_id)),
        }
    }
}
