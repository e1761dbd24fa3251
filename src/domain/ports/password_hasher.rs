//! Port abstraction for the password hashing collaborator.

use crate::domain::account::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// The hashing primitive rejected the input or its parameters.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Derives an opaque hash from a plaintext password at account creation.
///
/// Verification is not part of this service; sign-in lives elsewhere.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password.
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError>;
}
