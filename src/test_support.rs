//! In-memory test doubles shared by domain and handler tests.
//!
//! The store enforces the same user-name uniqueness the PostgreSQL unique
//! index provides so service tests exercise conflict behaviour faithfully.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::account::{AccountId, PasswordHash, UserAccount};
use crate::domain::ports::{
    AccountStore, AccountStoreError, PasswordHashError, PasswordHasher, StoredChanges,
};
use crate::domain::UserName;

#[derive(Default)]
struct StoreState {
    accounts: HashMap<AccountId, UserAccount>,
    failure: Option<AccountStoreError>,
}

/// Hash-map-backed [`AccountStore`] with injectable failures.
#[derive(Default)]
pub(crate) struct InMemoryAccountStore {
    state: Mutex<StoreState>,
}

impl InMemoryAccountStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with the given error.
    pub(crate) fn fail_with(&self, error: AccountStoreError) {
        let mut state = self.state.lock().expect("store state poisoned");
        state.failure = Some(error);
    }

    /// Number of records currently held.
    pub(crate) fn len(&self) -> usize {
        let state = self.state.lock().expect("store state poisoned");
        state.accounts.len()
    }

    fn check_failure(state: &StoreState) -> Result<(), AccountStoreError> {
        match &state.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn name_held_by_other(
        state: &StoreState,
        user_name: &UserName,
        current: Option<&AccountId>,
    ) -> bool {
        state
            .accounts
            .values()
            .any(|account| account.user_name() == user_name && current != Some(&account.id()))
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, account: &UserAccount) -> Result<(), AccountStoreError> {
        let mut state = self.state.lock().expect("store state poisoned");
        Self::check_failure(&state)?;
        if Self::name_held_by_other(&state, account.user_name(), None) {
            return Err(AccountStoreError::duplicate_user_name(
                account.user_name().as_ref(),
            ));
        }
        state.accounts.insert(account.id(), account.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserAccount>, AccountStoreError> {
        let state = self.state.lock().expect("store state poisoned");
        Self::check_failure(&state)?;
        Ok(state.accounts.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<UserAccount>, AccountStoreError> {
        let state = self.state.lock().expect("store state poisoned");
        Self::check_failure(&state)?;
        Ok(state.accounts.get(id).cloned())
    }

    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> Result<Option<UserAccount>, AccountStoreError> {
        let state = self.state.lock().expect("store state poisoned");
        Self::check_failure(&state)?;
        Ok(state
            .accounts
            .values()
            .find(|account| account.user_name() == user_name)
            .cloned())
    }

    async fn update(
        &self,
        id: &AccountId,
        changes: &StoredChanges,
    ) -> Result<Option<UserAccount>, AccountStoreError> {
        let mut state = self.state.lock().expect("store state poisoned");
        Self::check_failure(&state)?;
        if Self::name_held_by_other(&state, &changes.user_name, Some(id)) {
            return Err(AccountStoreError::duplicate_user_name(
                changes.user_name.as_ref(),
            ));
        }
        let Some(existing) = state.accounts.get(id) else {
            return Ok(None);
        };
        let updated = UserAccount::new(
            existing.id(),
            changes.user_name.clone(),
            changes.email.clone(),
            changes.id_card.clone(),
            changes.birth_date,
            existing.password_hash().clone(),
        );
        state.accounts.insert(*id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: &AccountId) -> Result<bool, AccountStoreError> {
        let mut state = self.state.lock().expect("store state poisoned");
        Self::check_failure(&state)?;
        Ok(state.accounts.remove(id).is_some())
    }
}

/// Deterministic [`PasswordHasher`] with injectable failures.
#[derive(Default)]
pub(crate) struct StubPasswordHasher {
    failure: Mutex<Option<PasswordHashError>>,
}

impl StubPasswordHasher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_with(&self, error: PasswordHashError) {
        let mut failure = self.failure.lock().expect("hasher state poisoned");
        *failure = Some(error);
    }
}

impl PasswordHasher for StubPasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        let failure = self.failure.lock().expect("hasher state poisoned");
        if let Some(error) = failure.as_ref() {
            return Err(error.clone());
        }
        Ok(PasswordHash::from_hash_string(format!("stub:{plaintext}")))
    }
}
