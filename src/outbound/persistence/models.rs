//! Row models mapping the `user_accounts` table to and from domain types.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::user_accounts;
use crate::domain::account::UserAccount;
use crate::domain::ports::StoredChanges;

/// Full row as selected from the database.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = user_accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserAccountRow {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub id_card: String,
    pub birth_date: NaiveDate,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for account creation.
///
/// Audit timestamps are filled by column defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = user_accounts)]
pub struct NewUserAccountRow<'a> {
    pub id: Uuid,
    pub user_name: &'a str,
    pub email: &'a str,
    pub id_card: &'a str,
    pub birth_date: NaiveDate,
    pub password_hash: &'a str,
}

impl<'a> From<&'a UserAccount> for NewUserAccountRow<'a> {
    fn from(account: &'a UserAccount) -> Self {
        Self {
            id: *account.id().as_uuid(),
            user_name: account.user_name().as_ref(),
            email: account.email().as_ref(),
            id_card: account.id_card().as_ref(),
            birth_date: account.birth_date(),
            password_hash: account.password_hash().as_str(),
        }
    }
}

/// Changeset applied by updates; the password hash is never part of it.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = user_accounts)]
pub struct AccountChangeset<'a> {
    pub user_name: &'a str,
    pub email: &'a str,
    pub id_card: &'a str,
    pub birth_date: NaiveDate,
}

impl<'a> From<&'a StoredChanges> for AccountChangeset<'a> {
    fn from(changes: &'a StoredChanges) -> Self {
        Self {
            user_name: changes.user_name.as_ref(),
            email: changes.email.as_ref(),
            id_card: changes.id_card.as_ref(),
            birth_date: changes.birth_date,
        }
    }
}
