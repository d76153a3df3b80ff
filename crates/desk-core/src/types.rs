//! Common types used throughout Desk

use serde::{Deserialize, Deserializer};

/// Field of a partial-update body.
///
/// Distinguishes a key that was left out of the JSON object from one that
/// was sent as `null`. Fields must be annotated with `#[serde(default)]` so
/// a missing key lands on [`Patch::Absent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not present in the body; leave the stored value alone
    Absent,
    /// Key present with an explicit `null`
    Null,
    /// Key present with a value
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// Overwrite `target` with the patched value, if any was supplied
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *target = None,
            Patch::Value(value) => *target = Some(value),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        note: Patch<String>,
    }

    #[test]
    fn test_absent_null_and_value() {
        let body: Body = serde_json::from_str(r#"{"name": "Petr", "note": null}"#).unwrap();
        assert_eq!(body.name, Patch::Value("Petr".to_string()));
        assert_eq!(body.note, Patch::Null);

        let body: Body = serde_json::from_str("{}").unwrap();
        assert!(body.name.is_absent());
        assert!(body.note.is_absent());
    }

    #[test]
    fn test_apply_to() {
        let mut target = Some("old".to_string());
        Patch::Absent.apply_to(&mut target);
        assert_eq!(target.as_deref(), Some("old"));

        Patch::Value("new".to_string()).apply_to(&mut target);
        assert_eq!(target.as_deref(), Some("new"));

        Patch::Null.apply_to(&mut target);
        assert_eq!(target, None);
    }
}
