//! Identifier Value Object
//!
//! The unique account handle, an email address. Unlike a display email it is
//! compared exactly: no trimming, no case folding. `User@site.com` and
//! `user@site.com` are two different identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Maximum identifier length (RFC 5321 path limit)
const IDENTIFIER_MAX_LENGTH: usize = 254;

/// Maximum local part length (RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Validate client input
    pub fn new(raw: impl Into<String>) -> AuthResult<Self> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(AuthError::Validation("email should not be empty".to_string()));
        }

        if raw.len() > IDENTIFIER_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "email must be at most {} characters",
                IDENTIFIER_MAX_LENGTH
            )));
        }

        if !Self::is_valid_format(&raw) {
            return Err(AuthError::Validation("email must be an email".to_string()));
        }

        Ok(Self(raw))
    }

    fn is_valid_format(email: &str) -> bool {
        if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return false;
        }

        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH {
            return false;
        }

        // A second '@' ends up in the domain and fails the charset check
        if domain.is_empty() || !domain.contains('.') || domain.contains("..") {
            return false;
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) {
            return false;
        }

        true
    }

    /// Rehydrate from storage or a verified token (already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
