//! Authorize Use Case
//!
//! Turns a bearer token into the [`Principal`] for the current request.

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::entity::account::{Account, AccountView};
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// The authenticated account attached to a request
///
/// Built from the stored account, not from the token claims, so profile
/// fields are current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal(AccountView);

impl Principal {
    pub fn account(&self) -> &AccountView {
        &self.0
    }

    pub fn into_account(self) -> AccountView {
        self.0
    }
}

impl From<&Account> for Principal {
    fn from(account: &Account) -> Self {
        Self(AccountView::from_account(account))
    }
}

pub struct AuthorizeUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> AuthorizeUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    /// Every token failure is [`AuthError::Unauthorized`]; the reason only
    /// goes to the log.
    pub async fn execute(&self, token: &str) -> AuthResult<Principal> {
        let account_ref = self.tokens.validate(token).map_err(|e| {
            tracing::debug!(reason = %e, "Bearer token rejected");
            AuthError::Unauthorized
        })?;

        let account = self
            .repo
            .find_by_id(&account_ref.account_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    account_id = %account_ref.account_id,
                    "Valid token for unknown account"
                );
                AuthError::Unauthorized
            })?;

        Ok(Principal::from(&account))
    }
}
