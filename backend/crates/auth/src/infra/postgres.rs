//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, StoreError, StoreResult};
use crate::domain::value_object::{
    account_id::AccountId, identifier::Identifier, password::PasswordHash,
    person_name::ProfileUpdate,
};

const ACCOUNT_COLUMNS: &str = r#"
    account_id,
    identifier,
    password_hash,
    first_name,
    last_name,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed account repository
///
/// Identifier uniqueness is the `accounts_identifier_key` constraint; a
/// violation surfaces as [`StoreError::Conflict`].
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(
        &self,
        identifier: &Identifier,
        password_hash: &PasswordHash,
    ) -> StoreResult<Account> {
        let account = Account::new(identifier.clone(), password_hash.clone());

        let result = sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                identifier,
                password_hash,
                first_name,
                last_name,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.identifier.as_str())
        .bind(account.password_hash.as_str())
        .bind(account.first_name.as_deref())
        .bind(account.last_name.as_deref())
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(account),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_identifier(&self, identifier: &Identifier) -> StoreResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {} FROM accounts WHERE identifier = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(identifier.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_id(&self, account_id: &AccountId) -> StoreResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {} FROM accounts WHERE account_id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn update_profile(
        &self,
        account_id: &AccountId,
        update: &ProfileUpdate,
    ) -> StoreResult<Option<Account>> {
        let (set_first, first_name) = update.first_name.as_sql_args();
        let (set_last, last_name) = update.last_name.as_sql_args();

        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            UPDATE accounts SET
                first_name = CASE WHEN $2 THEN $3 ELSE first_name END,
                last_name = CASE WHEN $4 THEN $5 ELSE last_name END,
                updated_at = $6
            WHERE account_id = $1
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        ))
        .bind(account_id.as_uuid())
        .bind(set_first)
        .bind(first_name)
        .bind(set_last)
        .bind(last_name)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    identifier: String,
    password_hash: String,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Account {
        Account {
            account_id: AccountId::from_uuid(self.account_id),
            identifier: Identifier::from_db(self.identifier),
            password_hash: PasswordHash::from_stored(self.password_hash),
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
