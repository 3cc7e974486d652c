//! Person Name Value Object
//!
//! First/last name profile fields and the partial update applied to them.

use serde::Serialize;

use crate::error::{AuthError, AuthResult};

/// Maximum name length in characters
pub const NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Change to one optional name field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NameChange {
    #[default]
    Unchanged,
    Cleared,
    Set(PersonName),
}

impl NameChange {
    /// Interpret an optional request field
    ///
    /// Absent leaves the field alone, blank clears it, anything else is
    /// trimmed and stored.
    pub fn parse(field: &'static str, raw: Option<String>) -> AuthResult<Self> {
        let Some(raw) = raw else {
            return Ok(Self::Unchanged);
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::Cleared);
        }

        if trimmed.chars().count() > NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "{} must be at most {} characters",
                field, NAME_MAX_LENGTH
            )));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(AuthError::Validation(format!(
                "{} contains invalid characters",
                field
            )));
        }

        Ok(Self::Set(PersonName(trimmed.to_string())))
    }

    /// New value for a field currently holding `current`
    pub fn apply(&self, current: Option<String>) -> Option<String> {
        match self {
            NameChange::Unchanged => current,
            NameChange::Cleared => None,
            NameChange::Set(name) => Some(name.0.clone()),
        }
    }

    /// `(overwrite, value)` pair for a conditional SQL update
    pub fn as_sql_args(&self) -> (bool, Option<&str>) {
        match self {
            NameChange::Unchanged => (false, None),
            NameChange::Cleared => (true, None),
            NameChange::Set(name) => (true, Some(name.as_str())),
        }
    }
}

/// Partial profile update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: NameChange,
    pub last_name: NameChange,
}

impl ProfileUpdate {
    pub fn is_noop(&self) -> bool {
        self.first_name == NameChange::Unchanged && self.last_name == NameChange::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absent_and_blank() {
        assert_eq!(NameChange::parse("firstName", None).unwrap(), NameChange::Unchanged);
        assert_eq!(
            NameChange::parse("firstName", Some("   ".to_string())).unwrap(),
            NameChange::Cleared
        );
    }

    #[test]
    fn test_parse_trims() {
        let change = NameChange::parse("firstName", Some("  Ada ".to_string())).unwrap();
        assert_eq!(change.apply(None), Some("Ada".to_string()));
    }

    #[test]
    fn test_parse_too_long() {
        let raw = "x".repeat(NAME_MAX_LENGTH + 1);
        assert!(matches!(
            NameChange::parse("lastName", Some(raw)),
            Err(AuthError::Validation(msg)) if msg.starts_with("lastName")
        ));
    }

    #[test]
    fn test_apply() {
        let current = Some("Old".to_string());
        assert_eq!(NameChange::Unchanged.apply(current.clone()), current);
        assert_eq!(NameChange::Cleared.apply(current.clone()), None);
    }

    #[test]
    fn test_sql_args() {
        assert_eq!(NameChange::Unchanged.as_sql_args(), (false, None));
        assert_eq!(NameChange::Cleared.as_sql_args(), (true, None));

        let set = NameChange::parse("firstName", Some("Ada".to_string())).unwrap();
        assert_eq!(set.as_sql_args(), (true, Some("Ada")));
    }

    #[test]
    fn test_is_noop() {
        assert!(ProfileUpdate::default().is_noop());
        let update = ProfileUpdate {
            first_name: NameChange::Cleared,
            ..Default::default()
        };
        assert!(!update.is_noop());
    }
}
