//! Password Value Objects
//!
//! Domain wrappers around `platform::password`:
//! - [`RawPassword`]: transient clear text from a request, zeroized on drop
//! - [`PasswordHash`]: opaque PHC string as stored, never serialized

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| {
            let message = match e {
                PasswordPolicyError::EmptyOrWhitespace => {
                    "password should not be empty".to_string()
                }
                PasswordPolicyError::TooLong { max, .. } => {
                    format!("password must be at most {} characters", max)
                }
                PasswordPolicyError::InvalidCharacter => {
                    "password contains invalid characters".to_string()
                }
            };
            AuthError::Validation(message)
        })?;

        Ok(Self(clear_text))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Password Hash (Stored)
// ============================================================================

/// Stored password hash
///
/// Deliberately not `Serialize`: the only ways out are the store and the
/// verifier.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn from_hashed(hashed: HashedPassword) -> Self {
        Self(hashed.into_phc_string())
    }

    /// Rehydrate from storage. Not parsed here: a corrupted value must fail
    /// verification, not loading.
    pub fn from_stored(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordHash").field(&"[HASH]").finish()
    }
}
