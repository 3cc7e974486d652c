//! Account Entity
//!
//! A registered credential holder plus its public profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_object::{
    account_id::AccountId, identifier::Identifier, password::PasswordHash,
    person_name::ProfileUpdate,
};

/// Account entity
///
/// Holds the password hash, so it never leaves the service as is.
/// Use [`AccountView`] for anything client-facing.
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    /// Unique, case-sensitive
    pub identifier: Identifier,
    pub password_hash: PasswordHash,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account
    pub fn new(identifier: Identifier, password_hash: PasswordHash) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            identifier,
            password_hash,
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a profile update in place
    pub fn apply_profile(&mut self, update: &ProfileUpdate) {
        self.first_name = update.first_name.apply(self.first_name.take());
        self.last_name = update.last_name.apply(self.last_name.take());
        self.updated_at = Utc::now();
    }
}

/// Sanitized account, safe to serialize
///
/// Every field of [`Account`] except the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountView {
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.account_id.into_uuid(),
            email: account.identifier.as_str().to_string(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self::from_account(account)
    }
}
