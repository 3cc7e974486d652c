//! Edit Profile Use Case
//!
//! Partial update of the principal's first/last name.

use std::sync::Arc;

use crate::application::authorize::Principal;
use crate::domain::entity::account::AccountView;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::domain::value_object::person_name::{NameChange, ProfileUpdate};
use crate::error::{AuthError, AuthResult};

/// Edit profile input. `None` leaves a field unchanged, blank clears it.
#[derive(Debug, Default)]
pub struct EditProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub struct EditProfileUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> EditProfileUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        principal: &Principal,
        input: EditProfileInput,
    ) -> AuthResult<AccountView> {
        let update = ProfileUpdate {
            first_name: NameChange::parse("firstName", input.first_name)?,
            last_name: NameChange::parse("lastName", input.last_name)?,
        };

        if update.is_noop() {
            return Ok(principal.account().clone());
        }

        let account_id = AccountId::from_uuid(principal.account().id);

        // The account may have vanished since the guard loaded it
        let account = self
            .repo
            .update_profile(&account_id, &update)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        tracing::info!(account_id = %account.account_id, "Profile updated");

        Ok(AccountView::from_account(&account))
    }
}
