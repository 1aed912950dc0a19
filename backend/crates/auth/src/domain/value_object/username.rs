//! Username Value Object
//!
//! A username is the public handle that identifies a user. The canonical
//! form is lowercase; uniqueness checks always run against it, which is
//! what makes availability case-insensitive.
//!
//! ## Invariants
//! - Length: 3 to 30 characters (after lowercasing)
//! - Characters: `a-z`, `0-9`, `_`, `-` only
//!
//! Validation failures carry user-facing verdict messages; callers are
//! expected to surface them as content verdicts, not protocol faults.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for a username (in characters)
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 30;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when username validation fails
///
/// The Display output of each variant is the message shown to the user
/// verbatim in availability verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernameError {
    /// Shorter than [`USERNAME_MIN_LENGTH`]
    TooShort,

    /// Longer than [`USERNAME_MAX_LENGTH`]
    TooLong,

    /// Contains a character outside `[a-z0-9_-]`
    InvalidCharacter,
}

impl fmt::Display for UsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(f, "Username must be at least 3 characters"),
            Self::TooLong => write!(f, "Username must be no more than 30 characters"),
            Self::InvalidCharacter => write!(
                f,
                "Username can only contain letters, numbers, underscores, and hyphens"
            ),
        }
    }
}

impl std::error::Error for UsernameError {}

// ============================================================================
// Username Value Object
// ============================================================================

/// Validated, canonical (lowercase) username
///
/// # Invariants
/// - Length between [`USERNAME_MIN_LENGTH`] and [`USERNAME_MAX_LENGTH`]
/// - Contains only lowercase ASCII alphanumerics, `_` and `-`
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username {
    canonical: String,
}

impl Username {
    /// Parse a username from raw input.
    ///
    /// Lowercases the input, then validates in order: minimum length,
    /// maximum length, character set. Validation short-circuits at the
    /// first failure.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, UsernameError> {
        let canonical = input.as_ref().to_lowercase();
        Self::validate(&canonical)?;
        Ok(Self { canonical })
    }

    /// Get the canonical (lowercase) username
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Convert to owned String (canonical form)
    #[inline]
    pub fn into_inner(self) -> String {
        self.canonical
    }

    fn validate(canonical: &str) -> Result<(), UsernameError> {
        let length = canonical.chars().count();
        if length < USERNAME_MIN_LENGTH {
            return Err(UsernameError::TooShort);
        }
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong);
        }

        if !canonical.chars().all(Self::is_valid_char) {
            return Err(UsernameError::InvalidCharacter);
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Username").field(&self.canonical).finish()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for Username {
    type Error = UsernameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Username> for String {
    fn from(name: Username) -> Self {
        name.canonical
    }
}

// ============================================================================
// Tests
// ============================================================================
