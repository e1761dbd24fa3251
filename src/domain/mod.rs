//! Domain primitives and the account directory core.
//!
//! Purpose: define the transport-agnostic account model, the directory
//! service implementing the five operations, the error taxonomy, and the
//! driven ports adapters plug into. Nothing in this tree knows about HTTP or
//! SQL.

pub mod account;
pub mod directory;
pub mod error;
pub mod password;
pub mod ports;

pub use self::account::{
    AccountId, AccountValidationError, EmailAddress, IdCard, PasswordHash, UserAccount, UserName,
};
pub use self::directory::{AccountChangesRequest, AccountDirectory, NewAccountRequest};
pub use self::error::{DirectoryError, DirectoryResult, FieldViolation};
pub use self::password::{PasswordPolicy, PasswordRejection, StandardPasswordPolicy};
