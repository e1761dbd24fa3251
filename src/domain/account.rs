//! User account aggregate and its validated value types.
//!
//! Keep inbound payload parsing outside the domain by exposing fallible
//! constructors that validate string inputs before a handler talks to the
//! directory service.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised by the account value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyId,
    InvalidId,
    EmptyUserName,
    UserNameTooShort { min: usize },
    UserNameTooLong { max: usize },
    UserNameInvalidCharacters,
    EmptyEmail,
    InvalidEmail,
    EmptyIdCard,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "account id must not be empty"),
            Self::InvalidId => write!(f, "account id must be a valid UUID"),
            Self::EmptyUserName => write!(f, "user name must not be empty"),
            Self::UserNameTooShort { min } => {
                write!(f, "user name must be at least {min} characters")
            }
            Self::UserNameTooLong { max } => {
                write!(f, "user name must be at most {max} characters")
            }
            Self::UserNameInvalidCharacters => write!(
                f,
                "user name may only contain letters, digits, or . _ @ + -",
            ),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyIdCard => write!(f, "id card reference must not be empty"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Stable account identifier stored as a UUID v4.
///
/// Assigned once at creation and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Validate and construct an [`AccountId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(AccountValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| AccountValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for AccountId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Minimum allowed length for a user name.
pub const USER_NAME_MIN: usize = 3;
/// Maximum allowed length for a user name.
pub const USER_NAME_MAX: usize = 32;

static USER_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn user_name_regex() -> &'static Regex {
    USER_NAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = r"^[A-Za-z0-9._@+-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("user name regex failed to compile: {error}"))
    })
}

/// Unique sign-in name for an account.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and non-empty.
/// - Between [`USER_NAME_MIN`] and [`USER_NAME_MAX`] characters.
/// - Restricted to letters, digits, and `. _ @ + -`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`] from raw input.
    pub fn new(user_name: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let normalized = user_name.as_ref().trim();
        if normalized.is_empty() {
            return Err(AccountValidationError::EmptyUserName);
        }

        let length = normalized.chars().count();
        if length < USER_NAME_MIN {
            return Err(AccountValidationError::UserNameTooShort { min: USER_NAME_MIN });
        }
        if length > USER_NAME_MAX {
            return Err(AccountValidationError::UserNameTooLong { max: USER_NAME_MAX });
        }

        if !user_name_regex().is_match(normalized) {
            return Err(AccountValidationError::UserNameInvalidCharacters);
        }

        Ok(Self(normalized.to_owned()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Contact email address for an account.
///
/// Only a syntactic shape check is performed; the directory does not enforce
/// email uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

/// Maximum length accepted for an email address.
pub const EMAIL_MAX: usize = 254;

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from raw input.
    pub fn new(email: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let normalized = email.as_ref().trim();
        if normalized.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        if normalized.chars().count() > EMAIL_MAX {
            return Err(AccountValidationError::InvalidEmail);
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(AccountValidationError::InvalidEmail);
        }

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(AccountValidationError::InvalidEmail);
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(AccountValidationError::InvalidEmail);
        }

        Ok(Self(normalized.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque password hash produced by the hashing collaborator.
///
/// Never serialized into responses; `Debug` output is redacted so hashes do
/// not leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-derived hash string.
    pub fn from_hash_string(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Encoded hash string for storage.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// A user account held by the directory.
///
/// ## Invariants
/// - `id` is unique and immutable for the lifetime of the record.
/// - `user_name` is unique across all live records; the backing store's
///   unique index is the arbiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    id: AccountId,
    user_name: UserName,
    email: EmailAddress,
    id_card: IdCard,
    birth_date: NaiveDate,
    password_hash: PasswordHash,
}

impl UserAccount {
    /// Assemble an account from validated parts.
    pub fn new(
        id: AccountId,
        user_name: UserName,
        email: EmailAddress,
        id_card: IdCard,
        birth_date: NaiveDate,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            id,
            user_name,
            email,
            id_card,
            birth_date,
            password_hash,
        }
    }

    /// Stable account identifier.
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Unique sign-in name.
    pub fn user_name(&self) -> &UserName {
        &self.user_name
    }

    /// Contact email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Identity-document reference.
    pub fn id_card(&self) -> &IdCard {
        &self.id_card
    }

    /// Date of birth.
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}

/// Free-form identity-document reference.
///
/// Required to be non-empty once trimmed; no further structure is assumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdCard(String);

impl IdCard {
    /// Validate and construct an [`IdCard`] from raw input.
    pub fn new(id_card: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let normalized = id_card.as_ref().trim();
        if normalized.is_empty() {
            return Err(AccountValidationError::EmptyIdCard);
        }
        Ok(Self(normalized.to_owned()))
    }
}

impl AsRef<str> for IdCard {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IdCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<IdCard> for String {
    fn from(value: IdCard) -> Self {
        value.0
    }
}

impl TryFrom<String> for IdCard {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
