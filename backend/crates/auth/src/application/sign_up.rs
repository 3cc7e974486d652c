//! Sign Up Use Case
//!
//! Registers a new account under a unique identifier.

use std::sync::Arc;

use crate::application::hasher::CredentialHasher;
use crate::domain::entity::account::AccountView;
use crate::domain::repository::{AccountRepository, StoreError};
use crate::domain::value_object::{identifier::Identifier, password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub identifier: String,
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub account: AccountView,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    hasher: CredentialHasher,
}

impl<R> SignUpUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, hasher: CredentialHasher) -> Self {
        Self { repo, hasher }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let identifier = Identifier::new(input.identifier)?;
        let password = RawPassword::new(input.password)?;

        let password_hash = self.hasher.hash(password).await?;

        // Uniqueness is enforced by the store, not by a prior lookup
        let account = match self.repo.create(&identifier, &password_hash).await {
            Ok(account) => account,
            Err(StoreError::Conflict) => return Err(AuthError::CredentialsTaken),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            account_id = %account.account_id,
            "Account signed up"
        );

        Ok(SignUpOutput {
            account: AccountView::from_account(&account),
        })
    }
}
