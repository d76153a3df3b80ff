//! Issue model
//!
//! Table: issues

use desk_core::traits::{Entity, Id, Identifiable};
use desk_core::types::Patch;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Issue entity
///
/// Belongs to exactly one employee and owns zero or more comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: Id,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub employee_id: Id,
}

impl Identifiable for Issue {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for Issue {
    const TYPE_NAME: &'static str = "Issue";
}

/// Writable issue fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IssueAttributes {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub employee_id: Option<Id>,
}

impl IssueAttributes {
    pub fn new(title: impl Into<String>, employee_id: Id) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
            employee_id: Some(employee_id),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<&Issue> for IssueAttributes {
    fn from(issue: &Issue) -> Self {
        Self {
            title: Some(issue.title.clone()),
            description: issue.description.clone(),
            employee_id: Some(issue.employee_id),
        }
    }
}

/// Partial update body. The owning employee cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IssuePatch {
    #[serde(default)]
    pub title: Patch<String>,

    #[serde(default)]
    pub description: Patch<String>,
}

impl IssuePatch {
    pub fn apply_to(self, attributes: &mut IssueAttributes) {
        self.title.apply_to(&mut attributes.title);
        self.description.apply_to(&mut attributes.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_omitted_when_absent() {
        let issue = Issue {
            id: 1,
            title: "Title".to_string(),
            description: None,
            employee_id: 2,
        };
        let json = serde_json::to_value(issue).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["employeeId"], 2);
    }

    #[test]
    fn test_description_may_be_empty() {
        let attributes = IssueAttributes::new("Title", 1).with_description("");
        assert!(attributes.validate().is_ok());
    }

    #[test]
    fn test_patch_null_clears_description() {
        let mut attributes = IssueAttributes::new("Title", 1).with_description("Description");
        let patch: IssuePatch = serde_json::from_str(r#"{"description": null}"#).unwrap();
        patch.apply_to(&mut attributes);

        assert_eq!(attributes.title.as_deref(), Some("Title"));
        assert_eq!(attributes.description, None);
    }
}
