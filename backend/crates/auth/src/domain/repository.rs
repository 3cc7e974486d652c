//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infrastructure
//! layer.

use thiserror::Error;

use crate::domain::entity::account::Account;
use crate::domain::value_object::{
    account_id::AccountId, identifier::Identifier, password::PasswordHash,
    person_name::ProfileUpdate,
};

/// Account store failure
#[derive(Debug, Error)]
pub enum StoreError {
    /// Identifier already registered
    #[error("identifier already registered")]
    Conflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Account repository trait
///
/// Implementations must make `create` atomic with respect to identifier
/// uniqueness: of two concurrent calls with the same identifier exactly one
/// succeeds and the other gets [`StoreError::Conflict`].
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Create a new account with a fresh id and no profile
    async fn create(
        &self,
        identifier: &Identifier,
        password_hash: &PasswordHash,
    ) -> StoreResult<Account>;

    /// Find account by identifier (exact match)
    async fn find_by_identifier(&self, identifier: &Identifier) -> StoreResult<Option<Account>>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: &AccountId) -> StoreResult<Option<Account>>;

    /// Apply a profile update, returning the updated account
    async fn update_profile(
        &self,
        account_id: &AccountId,
        update: &ProfileUpdate,
    ) -> StoreResult<Option<Account>>;
}
