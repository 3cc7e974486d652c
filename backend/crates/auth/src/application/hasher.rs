//! Credential Hasher
//!
//! Async facade over `platform::password::Argon2Hasher`. Argon2 is
//! deliberately slow, so both directions run on the blocking pool.

use std::sync::Arc;

use platform::password::Argon2Hasher;

use crate::application::config::{AuthConfig, ConfigError};
use crate::domain::value_object::password::{PasswordHash, RawPassword};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct CredentialHasher {
    inner: Arc<Argon2Hasher>,
    /// Stands in for the stored hash when no account matches
    decoy: PasswordHash,
}

impl CredentialHasher {
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        let hasher = Argon2Hasher::new(config.password_params, config.pepper())?;
        let decoy = PasswordHash::from_hashed(hasher.decoy_hash()?);

        Ok(Self {
            inner: Arc::new(hasher),
            decoy,
        })
    }

    /// Hash with a fresh random salt
    pub async fn hash(&self, password: RawPassword) -> AuthResult<PasswordHash> {
        let hasher = self.inner.clone();

        let hashed = tokio::task::spawn_blocking(move || hasher.hash(password.inner()))
            .await
            .map_err(|e| AuthError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(PasswordHash::from_hashed(hashed))
    }

    /// Check a password against a stored hash
    ///
    /// A malformed stored hash is a mismatch, not an error.
    pub async fn verify(&self, stored: &PasswordHash, password: RawPassword) -> AuthResult<bool> {
        let hasher = self.inner.clone();
        let stored = stored.as_str().to_string();

        let (matches, stale) = tokio::task::spawn_blocking(move || {
            let matches = hasher.verify(&stored, password.inner());
            (matches, matches && hasher.needs_rehash(&stored))
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))?;

        if stale {
            tracing::info!("Stored password hash uses an outdated algorithm");
        }

        Ok(matches)
    }

    /// Spend one full verification on a password that has no account
    ///
    /// Keeps an unknown identifier as slow to reject as a wrong password.
    pub async fn verify_decoy(&self, password: RawPassword) -> AuthResult<()> {
        self.verify(&self.decoy, password).await.map(|_| ())
    }
}
