//! Driven ports consumed by the account directory.
//!
//! Adapters under `outbound/` implement these traits; the domain only ever
//! sees the port types and their errors.

mod account_store;
mod macros;
mod password_hasher;

pub(crate) use macros::define_port_error;

pub use account_store::{AccountStore, AccountStoreError, StoredChanges};
pub use password_hasher::{PasswordHashError, PasswordHasher};
