//! Password policy applied when an account is created.
//!
//! The policy is a pluggable predicate so deployments can tighten or relax
//! the rules without touching the directory service. Every unmet requirement
//! is reported, not just the first, so a caller sees the full list at once.

use std::fmt;

/// Reasons a candidate password can be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordRejection {
    Empty,
    TooShort { min: usize },
    MissingDigit,
    MissingUppercase,
    MissingLowercase,
    MissingNonAlphanumeric,
}

impl fmt::Display for PasswordRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "password must not be empty"),
            Self::TooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::MissingDigit => write!(f, "password must contain a digit"),
            Self::MissingUppercase => write!(f, "password must contain an uppercase letter"),
            Self::MissingLowercase => write!(f, "password must contain a lowercase letter"),
            Self::MissingNonAlphanumeric => {
                write!(f, "password must contain a non-alphanumeric character")
            }
        }
    }
}

/// Pluggable password acceptance predicate.
pub trait PasswordPolicy: Send + Sync {
    /// Check a candidate password, returning every unmet requirement.
    ///
    /// An empty vector means the password is acceptable.
    fn check(&self, candidate: &str) -> Vec<PasswordRejection>;
}

/// Default policy: minimum length plus required character classes.
///
/// Mirrors the common "complexity" defaults of identity frameworks: at least
/// one digit, one uppercase letter, one lowercase letter, and one
/// non-alphanumeric character. Each class requirement can be switched off.
#[derive(Debug, Clone)]
pub struct StandardPasswordPolicy {
    min_length: usize,
    require_digit: bool,
    require_uppercase: bool,
    require_lowercase: bool,
    require_non_alphanumeric: bool,
}

impl Default for StandardPasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            require_digit: true,
            require_uppercase: true,
            require_lowercase: true,
            require_non_alphanumeric: true,
        }
    }
}

impl StandardPasswordPolicy {
    /// Construct the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum accepted length.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Toggle the digit requirement.
    pub fn with_require_digit(mut self, required: bool) -> Self {
        self.require_digit = required;
        self
    }

    /// Toggle the uppercase requirement.
    pub fn with_require_uppercase(mut self, required: bool) -> Self {
        self.require_uppercase = required;
        self
    }

    /// Toggle the lowercase requirement.
    pub fn with_require_lowercase(mut self, required: bool) -> Self {
        self.require_lowercase = required;
        self
    }

    /// Toggle the non-alphanumeric requirement.
    pub fn with_require_non_alphanumeric(mut self, required: bool) -> Self {
        self.require_non_alphanumeric = required;
        self
    }
}

impl PasswordPolicy for StandardPasswordPolicy {
    fn check(&self, candidate: &str) -> Vec<PasswordRejection> {
        if candidate.is_empty() {
            return vec![PasswordRejection::Empty];
        }

        let mut rejections = Vec::new();

        if candidate.chars().count() < self.min_length {
            rejections.push(PasswordRejection::TooShort {
                min: self.min_length,
            });
        }
        if self.require_digit && !candidate.chars().any(|c| c.is_ascii_digit()) {
            rejections.push(PasswordRejection::MissingDigit);
        }
        if self.require_uppercase && !candidate.chars().any(char::is_uppercase) {
            rejections.push(PasswordRejection::MissingUppercase);
        }
        if self.require_lowercase && !candidate.chars().any(char::is_lowercase) {
            rejections.push(PasswordRejection::MissingLowercase);
        }
        if self.require_non_alphanumeric && candidate.chars().all(char::is_alphanumeric) {
            rejections.push(PasswordRejection::MissingNonAlphanumeric);
        }

        rejections
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_password_short_circuits() {
        let policy = StandardPasswordPolicy::new();
        assert_eq!(policy.check(""), vec![PasswordRejection::Empty]);
    }

    #[rstest]
    fn all_unmet_requirements_are_reported() {
        let policy = StandardPasswordPolicy::new().with_min_length(8);
        let rejections = policy.check("abc");
        assert_eq!(
            rejections,
            vec![
                PasswordRejection::TooShort { min: 8 },
                PasswordRejection::MissingDigit,
                PasswordRejection::MissingUppercase,
                PasswordRejection::MissingNonAlphanumeric,
            ]
        );
    }

    #[rstest]
    #[case("P@ssw0rd!")]
    #[case("Tr1cky-Pass")]
    fn conforming_passwords_pass(#[case] candidate: &str) {
        let policy = StandardPasswordPolicy::new();
        assert!(policy.check(candidate).is_empty());
    }

    #[rstest]
    fn relaxed_policy_skips_disabled_classes() {
        let policy = StandardPasswordPolicy::new()
            .with_min_length(4)
            .with_require_digit(false)
            .with_require_uppercase(false)
            .with_require_non_alphanumeric(false);
        assert!(policy.check("plain").is_empty());
    }
}
