//! Directory error taxonomy.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope; the domain itself does
//! no logging and no recovery.

/// A single field-level validation violation.
///
/// Violations are collected rather than reported fail-fast so a caller can
/// present every problem with a submission at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field the violation applies to, in the casing clients submitted.
    pub field: &'static str,
    /// Human-readable description of the violation.
    pub message: String,
}

impl FieldViolation {
    /// Construct a violation for the given field.
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Failures reported by the account directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// One or more fields failed validation, including user-name uniqueness
    /// conflicts.
    #[error("account validation failed")]
    Validation {
        /// Every violation found in the submission.
        violations: Vec<FieldViolation>,
    },

    /// The requested account does not exist.
    #[error("account not found")]
    NotFound,

    /// The backing store could not be reached; callers may retry upstream.
    #[error("account store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// An unexpected failure inside the directory or its collaborators.
    #[error("internal directory error: {message}")]
    Internal { message: String },
}

impl DirectoryError {
    /// Build a validation error from collected violations.
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation { violations }
    }

    /// Build a validation error carrying a single violation.
    pub fn single_violation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            violations: vec![FieldViolation::new(field, message)],
        }
    }

    /// Build a store-unavailable error.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }

    /// Build an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Violations carried by a validation error, if any.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Validation { violations } => violations.as_slice(),
            _ => &[],
        }
    }
}

/// Convenient result alias for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;
