//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the directory service and remain testable without I/O.

use crate::domain::AccountDirectory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: AccountDirectory,
}

impl HttpState {
    /// Bundle the directory service for handler injection.
    pub fn new(directory: AccountDirectory) -> Self {
        Self { directory }
    }
}
