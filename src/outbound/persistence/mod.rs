//! PostgreSQL persistence adapter for the account directory.

mod diesel_account_store;
mod models;
mod pool;
mod schema;

pub use diesel_account_store::DieselAccountStore;
pub use pool::{DbPool, PoolConfig, PoolError};
