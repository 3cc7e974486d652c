//! Sign In Use Case
//!
//! Verifies credentials and issues an access token.

use std::sync::Arc;

use crate::application::hasher::CredentialHasher;
use crate::application::token::TokenService;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{identifier::Identifier, password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub identifier: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub access_token: String,
}

impl std::fmt::Debug for SignInOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInOutput")
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    hasher: CredentialHasher,
    tokens: Arc<TokenService>,
}

impl<R> SignInUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, hasher: CredentialHasher, tokens: Arc<TokenService>) -> Self {
        Self {
            repo,
            hasher,
            tokens,
        }
    }

    /// Unknown identifier and wrong password both end in
    /// [`AuthError::InvalidCredentials`].
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let identifier = Identifier::new(input.identifier)?;
        let password = RawPassword::new(input.password)?;

        let Some(account) = self.repo.find_by_identifier(&identifier).await? else {
            self.hasher.verify_decoy(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(&account.password_hash, password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self
            .tokens
            .issue(&account.account_id, &account.identifier)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(
            account_id = %account.account_id,
            "Account signed in"
        );

        Ok(SignInOutput { access_token })
    }
}
