//! Employee model
//!
//! Table: employees

use chrono::{DateTime, Utc};
use desk_core::traits::{Entity, Id, Identifiable};
use desk_core::types::Patch;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Employee entity
///
/// Root of the ownership tree: an employee owns zero or more issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Id,
    pub name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for Employee {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for Employee {
    const TYPE_NAME: &'static str = "Employee";
}

impl Employee {
    /// Get full name (name + last name)
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

/// Writable employee fields, as bound from a create body
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAttributes {
    #[validate(length(min = 1, max = 20))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
}

impl EmployeeAttributes {
    pub fn new(name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            last_name: Some(last_name.into()),
        }
    }
}

impl From<&Employee> for EmployeeAttributes {
    fn from(employee: &Employee) -> Self {
        Self {
            name: Some(employee.name.clone()),
            last_name: Some(employee.last_name.clone()),
        }
    }
}

/// Full replacement body: the complete representation including the id
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmployeeReplacement {
    pub id: Option<Id>,

    #[serde(flatten)]
    pub attributes: EmployeeAttributes,
}

/// Partial update body
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(default)]
    pub name: Patch<String>,

    #[serde(default)]
    pub last_name: Patch<String>,
}

impl EmployeePatch {
    /// Overlay the supplied fields on `attributes`
    pub fn apply_to(self, attributes: &mut EmployeeAttributes) {
        self.name.apply_to(&mut attributes.name);
        self.last_name.apply_to(&mut attributes.last_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ivan() -> Employee {
        Employee {
            id: 1,
            name: "Ivan".to_string(),
            last_name: "Ivanov".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(ivan()).unwrap();
        assert_eq!(json["lastName"], "Ivanov");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("last_name").is_none());
    }

    #[test]
    fn test_replacement_binds_id_and_fields() {
        let body: EmployeeReplacement =
            serde_json::from_str(r#"{"id": 3, "name": "Petr", "lastName": "Petrov"}"#).unwrap();
        assert_eq!(body.id, Some(3));
        assert_eq!(body.attributes, EmployeeAttributes::new("Petr", "Petrov"));
    }

    #[test]
    fn test_patch_touches_only_supplied_fields() {
        let mut attributes = EmployeeAttributes::from(&ivan());
        let patch: EmployeePatch = serde_json::from_str(r#"{"lastName": "Petrov"}"#).unwrap();
        patch.apply_to(&mut attributes);

        assert_eq!(attributes.name.as_deref(), Some("Ivan"));
        assert_eq!(attributes.last_name.as_deref(), Some("Petrov"));
    }

    #[test]
    fn test_length_counts_characters() {
        // 20 Cyrillic letters are 40 bytes but still within the name bound
        let attributes = EmployeeAttributes::new("Иванивановичпетрович", "Иванов");
        assert!(attributes.validate().is_ok());

        let attributes = EmployeeAttributes::new("Иванивановичпетровичь", "Иванов");
        assert!(attributes.validate().is_err());
    }
}
