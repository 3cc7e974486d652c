//! In-Memory Repository Implementation
//!
//! Process-local account store for tests and database-less development.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, StoreError, StoreResult};
use crate::domain::value_object::{
    account_id::AccountId, identifier::Identifier, password::PasswordHash,
    person_name::ProfileUpdate,
};

#[derive(Default)]
struct Accounts {
    by_id: HashMap<AccountId, Account>,
    by_identifier: HashMap<Identifier, AccountId>,
}

/// In-memory account repository
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<Accounts>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remove an account (no HTTP surface; used to simulate deletion)
    pub async fn remove(&self, account_id: &AccountId) -> Option<Account> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.by_id.remove(account_id)?;
        accounts.by_identifier.remove(&account.identifier);
        Some(account)
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn create(
        &self,
        identifier: &Identifier,
        password_hash: &PasswordHash,
    ) -> StoreResult<Account> {
        // Check and insert under one write lock
        let mut accounts = self.accounts.write().await;

        if accounts.by_identifier.contains_key(identifier) {
            return Err(StoreError::Conflict);
        }

        let account = Account::new(identifier.clone(), password_hash.clone());
        accounts
            .by_identifier
            .insert(identifier.clone(), account.account_id);
        accounts.by_id.insert(account.account_id, account.clone());

        Ok(account)
    }

    async fn find_by_identifier(&self, identifier: &Identifier) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .by_identifier
            .get(identifier)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> StoreResult<Option<Account>> {
        Ok(self.accounts.read().await.by_id.get(account_id).cloned())
    }

    async fn update_profile(
        &self,
        account_id: &AccountId,
        update: &ProfileUpdate,
    ) -> StoreResult<Option<Account>> {
        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.by_id.get_mut(account_id) else {
            return Ok(None);
        };

        account.apply_profile(update);

        Ok(Some(account.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::person_name::NameChange;

    fn identifier(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    fn hash(s: &str) -> PasswordHash {
        PasswordHash::from_stored(s)
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.create(&identifier("a@b.io"), &hash("h1")).await.unwrap();

        let by_identifier = repo
            .find_by_identifier(&identifier("a@b.io"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_identifier.account_id, created.account_id);

        let by_id = repo.find_by_id(&created.account_id).await.unwrap().unwrap();
        assert_eq!(by_id.identifier, identifier("a@b.io"));
    }

    #[tokio::test]
    async fn test_conflict_keeps_first_account() {
        let repo = InMemoryAccountRepository::new();
        repo.create(&identifier("a@b.io"), &hash("h1")).await.unwrap();

        let second = repo.create(&identifier("a@b.io"), &hash("h2")).await;
        assert!(matches!(second, Err(StoreError::Conflict)));

        let stored = repo
            .find_by_identifier(&identifier("a@b.io"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.password_hash.as_str(), "h1");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_identifier_exact_match() {
        let repo = InMemoryAccountRepository::new();
        repo.create(&identifier("A@b.io"), &hash("h1")).await.unwrap();

        assert!(repo
            .find_by_identifier(&identifier("a@b.io"))
            .await
            .unwrap()
            .is_none());
        assert!(repo.create(&identifier("a@b.io"), &hash("h2")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_profile() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.create(&identifier("a@b.io"), &hash("h1")).await.unwrap();

        let update = ProfileUpdate {
            first_name: NameChange::parse("firstName", Some("Ada".to_string())).unwrap(),
            last_name: NameChange::Unchanged,
        };
        let updated = repo
            .update_profile(&created.account_id, &update)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.first_name.as_deref(), Some("Ada"));
        assert_eq!(updated.password_hash, created.password_hash);

        let missing = repo.update_profile(&AccountId::new(), &update).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.create(&identifier("a@b.io"), &hash("h1")).await.unwrap();

        assert!(repo.remove(&created.account_id).await.is_some());
        assert!(repo.is_empty().await);
        assert!(repo.find_by_id(&created.account_id).await.unwrap().is_none());
    }
}
