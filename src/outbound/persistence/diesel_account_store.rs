//! PostgreSQL-backed [`AccountStore`] implementation using Diesel.
//!
//! The `user_accounts_user_name_key` unique index is the arbiter for
//! concurrent inserts and renames; this adapter surfaces index collisions as
//! [`AccountStoreError::DuplicateUserName`] and never pre-locks.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::account::{
    AccountId, EmailAddress, IdCard, PasswordHash, UserAccount, UserName,
};
use crate::domain::ports::{AccountStore, AccountStoreError, StoredChanges};

use super::models::{AccountChangeset, NewUserAccountRow, UserAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::user_accounts;

/// Diesel-backed implementation of the [`AccountStore`] port.
#[derive(Clone)]
pub struct DieselAccountStore {
    pool: DbPool,
}

impl DieselAccountStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to account store errors.
fn map_pool_error(error: PoolError) -> AccountStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AccountStoreError::connection(message)
        }
    }
}

/// Map Diesel errors raised by reads and deletes.
fn map_diesel_error(error: diesel::result::Error) -> AccountStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => AccountStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => AccountStoreError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AccountStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => AccountStoreError::query("database error"),
        _ => AccountStoreError::query("database error"),
    }
}

/// Map Diesel errors raised by writes, attributing unique-index collisions
/// to the submitted user name.
fn map_write_error(error: diesel::result::Error, user_name: &UserName) -> AccountStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        debug!(
            message = info.message(),
            user_name = %user_name,
            "unique index rejected write"
        );
        return AccountStoreError::duplicate_user_name(user_name.as_ref());
    }
    map_diesel_error(error)
}

/// Convert a database row to a domain account.
///
/// Stored rows were validated on the way in; a failure here means the table
/// holds data this build no longer accepts.
fn row_to_account(row: UserAccountRow) -> Result<UserAccount, AccountStoreError> {
    let user_name = UserName::new(&row.user_name)
        .map_err(|err| AccountStoreError::query(format!("stored user name invalid: {err}")))?;
    let email = EmailAddress::new(&row.email)
        .map_err(|err| AccountStoreError::query(format!("stored email invalid: {err}")))?;
    let id_card = IdCard::new(&row.id_card)
        .map_err(|err| AccountStoreError::query(format!("stored id card invalid: {err}")))?;

    Ok(UserAccount::new(
        AccountId::from(row.id),
        user_name,
        email,
        id_card,
        row.birth_date,
        PasswordHash::from_hash_string(row.password_hash),
    ))
}

#[async_trait]
impl AccountStore for DieselAccountStore {
    async fn insert(&self, account: &UserAccount) -> Result<(), AccountStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserAccountRow::from(account);
        diesel::insert_into(user_accounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, account.user_name()))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserAccount>, AccountStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserAccountRow> = user_accounts::table
            .select(UserAccountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_account).collect()
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<UserAccount>, AccountStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserAccountRow> = user_accounts::table
            .filter(user_accounts::id.eq(id.as_uuid()))
            .select(UserAccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_user_name(
        &self,
        user_name: &UserName,
    ) -> Result<Option<UserAccount>, AccountStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserAccountRow> = user_accounts::table
            .filter(user_accounts::user_name.eq(user_name.as_ref()))
            .select(UserAccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn update(
        &self,
        id: &AccountId,
        changes: &StoredChanges,
    ) -> Result<Option<UserAccount>, AccountStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserAccountRow> = diesel::update(
            user_accounts::table.filter(user_accounts::id.eq(id.as_uuid())),
        )
        .set(AccountChangeset::from(changes))
        .returning(UserAccountRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| map_write_error(err, &changes.user_name))?;

        row.map(row_to_account).transpose()
    }

    async fn delete(&self, id: &AccountId) -> Result<bool, AccountStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(
            user_accounts::table.filter(user_accounts::id.eq(id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
