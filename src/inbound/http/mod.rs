//! Actix Web inbound adapter.
//!
//! Decodes requests into the directory's request structs, invokes one
//! operation, and renders the result. The adapter performs no
//! authentication: an upstream gateway verifies the caller is an
//! administrator before traffic reaches this service.

pub mod accounts;
pub mod error;
pub mod health;
pub mod routes;
pub mod state;

pub use error::{ApiResult, ErrorBody, ViolationBody};
pub use state::HttpState;

#[cfg(test)]
mod accounts_tests;
