//! Comment contracts

use desk_models::CommentAttributes;

use crate::base::{check_lengths, require, Contract, FieldName, ValidationResult};

const FIELDS: &[FieldName] = &[("text", "text")];

/// Contract for creating a comment. The `issueId` parameter is checked by
/// the caller before this runs.
pub struct CommentContract;

impl Contract<CommentAttributes> for CommentContract {
    fn validate(&self, entity: &CommentAttributes) -> ValidationResult {
        require(entity.text.as_ref(), "text")?;
        check_lengths(entity, FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_required() {
        let err = CommentContract
            .validate(&CommentAttributes::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "The 'text' field is required");
    }

    #[test]
    fn test_text_bounds() {
        assert!(CommentContract.validate(&CommentAttributes::new("Text")).is_ok());
        assert!(CommentContract
            .validate(&CommentAttributes::new("x".repeat(400)))
            .is_ok());

        let err = CommentContract
            .validate(&CommentAttributes::new(""))
            .unwrap_err();
        assert_eq!(err.to_string(), "The 'text' field must have at least 1 character");

        let err = CommentContract
            .validate(&CommentAttributes::new("x".repeat(401)))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The 'text' field length should be at most 400 characters"
        );
    }
}
