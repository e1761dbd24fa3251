//! Account directory service.
//!
//! Implements the five directory operations against the driven ports. Each
//! operation is a single unit of work; uniqueness races are settled by the
//! store's unique index, never by an application-level lock.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::account::{
    AccountId, AccountValidationError, EmailAddress, IdCard, UserAccount, UserName,
};
use crate::domain::error::{DirectoryError, DirectoryResult, FieldViolation};
use crate::domain::password::PasswordPolicy;
use crate::domain::ports::{
    AccountStore, AccountStoreError, PasswordHashError, PasswordHasher, StoredChanges,
};

/// Raw input for creating an account.
///
/// Values arrive as the caller submitted them; the directory validates and
/// reports every violation in one response.
#[derive(Debug, Clone)]
pub struct NewAccountRequest {
    pub user_name: String,
    pub email: String,
    pub id_card: String,
    pub birth_date: Option<NaiveDate>,
    pub password: String,
}

/// Raw input for updating an account.
///
/// The password is deliberately absent: updates never change it.
#[derive(Debug, Clone)]
pub struct AccountChangesRequest {
    pub user_name: String,
    pub email: String,
    pub id_card: String,
    pub birth_date: Option<NaiveDate>,
}

/// Message shown when a user name is held by another record.
const USER_NAME_TAKEN: &str = "user name is already taken";

/// The account directory: holds user records behind five operations with
/// uniqueness and validation enforcement.
///
/// Callers are trusted to have been authorized upstream; the directory takes
/// no role or claims input.
#[derive(Clone)]
pub struct AccountDirectory {
    store: Arc<dyn AccountStore>,
    hasher: Arc<dyn PasswordHasher>,
    policy: Arc<dyn PasswordPolicy>,
}

/// Validated field values shared by create and update submissions.
struct ValidatedFields {
    user_name: UserName,
    email: EmailAddress,
    id_card: IdCard,
    birth_date: NaiveDate,
}

fn map_store_error(error: AccountStoreError) -> DirectoryError {
    match error {
        AccountStoreError::Connection { message } => DirectoryError::store_unavailable(message),
        AccountStoreError::Query { message } => DirectoryError::internal(message),
        AccountStoreError::DuplicateUserName { .. } => {
            DirectoryError::single_violation("userName", USER_NAME_TAKEN)
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> DirectoryError {
    let PasswordHashError::Hashing { message } = error;
    DirectoryError::internal(format!("password hashing failed: {message}"))
}

fn collect_violation<T>(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    result: Result<T, AccountValidationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            violations.push(FieldViolation::new(field, error.to_string()));
            None
        }
    }
}

fn validate_fields(
    violations: &mut Vec<FieldViolation>,
    user_name: &str,
    email: &str,
    id_card: &str,
    birth_date: Option<NaiveDate>,
) -> Option<ValidatedFields> {
    let user_name = collect_violation(violations, "userName", UserName::new(user_name));
    let email = collect_violation(violations, "email", EmailAddress::new(email));
    let id_card = collect_violation(violations, "idCard", IdCard::new(id_card));
    let birth_date = match birth_date {
        Some(date) => Some(date),
        None => {
            violations.push(FieldViolation::new("birthDate", "birth date is required"));
            None
        }
    };

    Some(ValidatedFields {
        user_name: user_name?,
        email: email?,
        id_card: id_card?,
        birth_date: birth_date?,
    })
}

impl AccountDirectory {
    /// Create a directory over the given store, hasher, and password policy.
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<dyn PasswordHasher>,
        policy: Arc<dyn PasswordPolicy>,
    ) -> Self {
        Self {
            store,
            hasher,
            policy,
        }
    }

    /// List every live account in implementation-defined order.
    pub async fn list(&self) -> DirectoryResult<Vec<UserAccount>> {
        self.store.list().await.map_err(map_store_error)
    }

    /// Fetch a single account by identifier.
    pub async fn get_by_id(&self, id: &AccountId) -> DirectoryResult<UserAccount> {
        self.store
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or(DirectoryError::NotFound)
    }

    /// Create a new account with a freshly assigned identifier.
    ///
    /// Collects every field violation, password-policy rejection, and
    /// user-name conflict before reporting; a failed attempt leaves no
    /// record behind. The unique index remains the arbiter for concurrent
    /// submissions of the same user name.
    pub async fn create(&self, request: NewAccountRequest) -> DirectoryResult<UserAccount> {
        let mut violations = Vec::new();
        let fields = validate_fields(
            &mut violations,
            &request.user_name,
            &request.email,
            &request.id_card,
            request.birth_date,
        );

        for rejection in self.policy.check(&request.password) {
            violations.push(FieldViolation::new("password", rejection.to_string()));
        }

        if let Some(fields) = &fields {
            self.check_name_available(&mut violations, &fields.user_name, None)
                .await?;
        }

        let Some(fields) = fields else {
            return Err(DirectoryError::validation(violations));
        };
        if !violations.is_empty() {
            return Err(DirectoryError::validation(violations));
        }

        let password_hash = self
            .hasher
            .hash(&request.password)
            .map_err(map_hash_error)?;

        let account = UserAccount::new(
            AccountId::random(),
            fields.user_name,
            fields.email,
            fields.id_card,
            fields.birth_date,
            password_hash,
        );

        self.store
            .insert(&account)
            .await
            .map_err(map_store_error)?;
        Ok(account)
    }

    /// Update an account's profile fields, leaving the password untouched.
    ///
    /// A missing id reports [`DirectoryError::NotFound`] before the
    /// submission is validated.
    pub async fn update(
        &self,
        id: &AccountId,
        request: AccountChangesRequest,
    ) -> DirectoryResult<UserAccount> {
        self.store
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or(DirectoryError::NotFound)?;

        let mut violations = Vec::new();
        let fields = validate_fields(
            &mut violations,
            &request.user_name,
            &request.email,
            &request.id_card,
            request.birth_date,
        );

        if let Some(fields) = &fields {
            self.check_name_available(&mut violations, &fields.user_name, Some(id))
                .await?;
        }

        let Some(fields) = fields else {
            return Err(DirectoryError::validation(violations));
        };
        if !violations.is_empty() {
            return Err(DirectoryError::validation(violations));
        }

        let changes = StoredChanges {
            user_name: fields.user_name,
            email: fields.email,
            id_card: fields.id_card,
            birth_date: fields.birth_date,
        };

        self.store
            .update(id, &changes)
            .await
            .map_err(map_store_error)?
            .ok_or(DirectoryError::NotFound)
    }

    /// Permanently remove an account.
    ///
    /// Deleting an already-absent identifier reports [`DirectoryError::NotFound`]
    /// rather than succeeding; callers must treat that as "already gone".
    pub async fn delete(&self, id: &AccountId) -> DirectoryResult<()> {
        let removed = self.store.delete(id).await.map_err(map_store_error)?;
        if removed {
            Ok(())
        } else {
            Err(DirectoryError::NotFound)
        }
    }

    /// Report a user-name violation when the name is held by a record other
    /// than `current`. Advisory only: the unique index settles races.
    async fn check_name_available(
        &self,
        violations: &mut Vec<FieldViolation>,
        user_name: &UserName,
        current: Option<&AccountId>,
    ) -> DirectoryResult<()> {
        let holder = self
            .store
            .find_by_user_name(user_name)
            .await
            .map_err(map_store_error)?;

        if let Some(existing) = holder {
            if current != Some(&existing.id()) {
                violations.push(FieldViolation::new("userName", USER_NAME_TAKEN));
            }
        }
        Ok(())
    }
}
