//! Base contract system

use desk_core::error::ValidationError;
use validator::Validate;

pub use desk_core::result::ValidationResult;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;
}

/// Maps a model's Rust field name to the name clients send on the wire
pub type FieldName = (&'static str, &'static str);

/// Run the model's `validator` rules and report the first length violation
/// in `fields` order.
pub fn check_lengths<T: Validate>(entity: &T, fields: &[FieldName]) -> ValidationResult {
    let errors = match entity.validate() {
        Ok(()) => return Ok(()),
        Err(errors) => errors,
    };

    let field_errors = errors.field_errors();
    for &(rust_name, wire_name) in fields {
        // validator keys by the Rust name unless a field-level serde rename is set
        let errs = field_errors
            .get(&rust_name)
            .or_else(|| field_errors.get(&wire_name));
        if let Some(error) = errs.and_then(|errs| errs.first()) {
            return Err(length_violation(wire_name, error));
        }
    }

    Ok(())
}

/// Check that a required value is present
pub fn require<T>(value: Option<&T>, field: &'static str) -> ValidationResult {
    match value {
        Some(_) => Ok(()),
        None => Err(ValidationError::required(field)),
    }
}

fn length_violation(field: &'static str, error: &validator::ValidationError) -> ValidationError {
    let bound = |key: &str| error.params.get(key).and_then(|value| value.as_u64());
    let length = error
        .params
        .get("value")
        .and_then(|value| value.as_str())
        .map(|value| value.chars().count() as u64);

    match (bound("min"), bound("max"), length) {
        (Some(min), _, Some(length)) if length < min => ValidationError::too_short(field, min),
        (_, Some(max), _) => ValidationError::too_long(field, max),
        (Some(min), None, _) => ValidationError::too_short(field, min),
        (None, None, _) => ValidationError::new(field, format!("The '{}' field is invalid", field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 2, max = 4))]
        first: Option<String>,
        #[validate(length(max = 3))]
        second_field: Option<String>,
    }

    const FIELDS: &[FieldName] = &[("first", "first"), ("second_field", "secondField")];

    fn sample(first: &str, second: &str) -> Sample {
        Sample {
            first: Some(first.to_string()),
            second_field: Some(second.to_string()),
        }
    }

    #[test]
    fn test_within_bounds() {
        assert!(check_lengths(&sample("ab", "abc"), FIELDS).is_ok());
    }

    #[test]
    fn test_too_short_and_too_long() {
        let err = check_lengths(&sample("a", "abc"), FIELDS).unwrap_err();
        assert_eq!(err, ValidationError::too_short("first", 2));

        let err = check_lengths(&sample("abcde", "abc"), FIELDS).unwrap_err();
        assert_eq!(err, ValidationError::too_long("first", 4));
    }

    #[test]
    fn test_first_field_wins_and_wire_name_is_used() {
        let err = check_lengths(&sample("a", "abcd"), FIELDS).unwrap_err();
        assert_eq!(err.field, "first");

        let err = check_lengths(&sample("ab", "abcd"), FIELDS).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The 'secondField' field length should be at most 3 characters"
        );
    }

    #[test]
    fn test_absent_values_are_not_length_checked() {
        let entity = Sample {
            first: None,
            second_field: None,
        };
        assert!(check_lengths(&entity, FIELDS).is_ok());
    }

    #[test]
    fn test_require() {
        assert!(require(Some(&1), "employeeId").is_ok());
        assert_eq!(
            require::<i64>(None, "employeeId").unwrap_err().to_string(),
            "The 'employeeId' field is required"
        );
    }
}
