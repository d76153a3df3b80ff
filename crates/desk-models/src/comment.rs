//! Comment model
//!
//! Table: comments

use desk_core::traits::{Entity, Id, Identifiable};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Comment entity, always attached to one issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Id,
    pub text: String,
    pub likes: i32,
    pub issue_id: Id,
}

impl Identifiable for Comment {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for Comment {
    const TYPE_NAME: &'static str = "Comment";
}

/// Writable comment fields. The parent issue travels separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct CommentAttributes {
    #[validate(length(min = 1, max = 400))]
    pub text: Option<String>,

    pub likes: Option<i32>,
}

impl CommentAttributes {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            likes: None,
        }
    }

    pub fn with_likes(mut self, likes: i32) -> Self {
        self.likes = Some(likes);
        self
    }
}
