//! Account directory service library.
//!
//! A user-administration service: user accounts behind five directory
//! operations (list, get, create, update, delete), persisted in PostgreSQL,
//! fronted by an Actix Web adapter that trusts an upstream gateway for
//! authentication and authorization.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
