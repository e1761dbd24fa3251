//! Argon2-backed [`PasswordHasher`] adapter.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher as _};

use crate::domain::account::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Hashes plaintext passwords with Argon2id and a fresh random salt.
///
/// The resulting PHC-format string is what the store persists; this service
/// never verifies passwords, so no verify path exists here.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Create a hasher with the default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hashed = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(PasswordHash::from_hash_string(hashed.to_string()))
    }
}
