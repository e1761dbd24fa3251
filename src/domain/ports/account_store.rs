//! Port abstraction for account persistence adapters and their errors.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::account::{AccountId, EmailAddress, IdCard, UserAccount, UserName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account store adapters.
    pub enum AccountStoreError {
        /// Store connection could not be established or was lost.
        Connection { message: String } => "account store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account store query failed: {message}",
        /// The unique index rejected a user name already held by another record.
        DuplicateUserName { user_name: String } => "user name already taken: {user_name}",
    }
}

/// Field values applied to a stored record by [`AccountStore::update`].
///
/// The password hash is deliberately absent: updates never touch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredChanges {
    pub user_name: UserName,
    pub email: EmailAddress,
    pub id_card: IdCard,
    pub birth_date: NaiveDate,
}

/// Durable store collaborator for user accounts.
///
/// The store's unique index on the user name is the sole arbiter for
/// concurrent inserts and renames; adapters must surface index collisions as
/// [`AccountStoreError::DuplicateUserName`].
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new record; the insert is atomic and unique-constrained.
    async fn insert(&self, account: &UserAccount) -> Result<(), AccountStoreError>;

    /// Fetch every live record in implementation-defined order.
    async fn list(&self) -> Result<Vec<UserAccount>, AccountStoreError>;

    /// Point lookup by identifier.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<UserAccount>, AccountStoreError>;

    /// Point lookup by user name.
    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> Result<Option<UserAccount>, AccountStoreError>;

    /// Apply changes to a record, returning the updated record or `None`
    /// when the identifier does not resolve.
    async fn update(
        &self,
        id: &AccountId,
        changes: &StoredChanges,
    ) -> Result<Option<UserAccount>, AccountStoreError>;

    /// Remove a record, reporting whether one existed.
    async fn delete(&self, id: &AccountId) -> Result<bool, AccountStoreError>;
}
