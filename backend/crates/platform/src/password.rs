//! Password Policy and Hashing
//!
//! Password handling with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Constant-time comparison
//! - Configurable acceptance policy (standard or strict character classes)

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Policy
// ============================================================================

/// Password acceptance policy
///
/// `Standard` enforces length bounds only. `Strict` additionally requires
/// at least one digit, one lowercase and one uppercase letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordPolicy {
    #[default]
    Standard,
    Strict,
}

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters long")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains control characters
    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    /// Strict policy: a required character class is missing
    #[error("Password must contain at least one digit, one lowercase letter, and one uppercase letter")]
    MissingCharacterClass,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// The raw password is NFKC-normalized, validated against the policy,
/// and securely erased from memory when dropped. Does not implement
/// `Clone`; Debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password, validating against `policy`.
    ///
    /// Unicode is normalized using NFKC before validation; lengths are
    /// counted in code points, not bytes.
    pub fn new(raw: String, policy: PasswordPolicy) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Control characters are never acceptable (space/tab excepted)
        for ch in normalized.chars() {
            if ch.is_control() && ch != ' ' && ch != '\t' {
                return Err(PasswordPolicyError::InvalidCharacter);
            }
        }

        if policy == PasswordPolicy::Strict {
            let has_digit = normalized.chars().any(|c| c.is_ascii_digit());
            let has_lower = normalized.chars().any(|c| c.is_lowercase());
            let has_upper = normalized.chars().any(|c| c.is_uppercase());
            if !(has_digit && has_lower && has_upper) {
                return Err(PasswordPolicyError::MissingCharacterClass);
            }
        }

        Ok(Self(normalized))
    }

    /// Create without validation (for testing or trusted input)
    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id
    ///
    /// ## Arguments
    /// * `pepper` - Optional application-wide secret for additional security
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `HashedPassword`
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let password_bytes = match pepper {
            Some(p) => {
                let mut combined = self.as_bytes().to_vec();
                combined.extend_from_slice(p);
                combined
            }
            None => self.as_bytes().to_vec(),
        };

        let salt = SaltString::generate(OsRng);

        // Argon2::default() uses the OWASP-recommended Argon2id parameters
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// Stores the Argon2id hash in PHC format (algorithm, version, parameters,
/// salt and hash in one string).
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// ## Arguments
    /// * `password` - The clear text password to verify
    /// * `pepper` - Optional pepper (must match the one used during hashing)
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let password_bytes = match pepper {
            Some(p) => {
                let mut combined = password.as_bytes().to_vec();
                combined.extend_from_slice(p);
                combined
            }
            None => password.as_bytes().to_vec(),
        };

        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        let argon2 = Argon2::default();

        // Argon2 uses constant-time comparison internally
        argon2
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod policy {
        use super::*;

        #[test]
        fn test_minimum_length() {
            let err = ClearTextPassword::new("short".to_string(), PasswordPolicy::Standard);
            assert!(matches!(
                err,
                Err(PasswordPolicyError::TooShort { min: 8, actual: 5 })
            ));
        }

        #[test]
        fn test_too_short_message() {
            let err = ClearTextPassword::new("short".to_string(), PasswordPolicy::Standard)
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "Password must be at least 8 characters long"
            );
        }

        #[test]
        fn test_eight_chars_accepted() {
            assert!(ClearTextPassword::new("12345678".to_string(), PasswordPolicy::Standard).is_ok());
        }

        #[test]
        fn test_maximum_length() {
            let long = "a".repeat(MAX_PASSWORD_LENGTH + 1);
            assert!(matches!(
                ClearTextPassword::new(long, PasswordPolicy::Standard),
                Err(PasswordPolicyError::TooLong { .. })
            ));
        }

        #[test]
        fn test_whitespace_only_rejected() {
            assert!(matches!(
                ClearTextPassword::new("        ".to_string(), PasswordPolicy::Standard),
                Err(PasswordPolicyError::EmptyOrWhitespace)
            ));
        }

        #[test]
        fn test_control_characters_rejected() {
            assert!(matches!(
                ClearTextPassword::new("pass\u{0000}word".to_string(), PasswordPolicy::Standard),
                Err(PasswordPolicyError::InvalidCharacter)
            ));
        }

        #[test]
        fn test_strict_requires_character_classes() {
            assert!(matches!(
                ClearTextPassword::new("alllowercase".to_string(), PasswordPolicy::Strict),
                Err(PasswordPolicyError::MissingCharacterClass)
            ));
            assert!(matches!(
                ClearTextPassword::new("NoDigitsHere".to_string(), PasswordPolicy::Strict),
                Err(PasswordPolicyError::MissingCharacterClass)
            ));
            assert!(ClearTextPassword::new("Str0ngEnough".to_string(), PasswordPolicy::Strict).is_ok());
        }

        #[test]
        fn test_standard_ignores_character_classes() {
            assert!(
                ClearTextPassword::new("alllowercase".to_string(), PasswordPolicy::Standard).is_ok()
            );
        }
    }

    mod hashing {
        use super::*;

        #[test]
        fn test_hash_and_verify() {
            let password = ClearTextPassword::new_unchecked("correct horse".to_string());
            let hashed = password.hash(None).unwrap();
            assert!(hashed.verify(&password, None));
        }

        #[test]
        fn test_wrong_password_fails() {
            let password = ClearTextPassword::new_unchecked("correct horse".to_string());
            let other = ClearTextPassword::new_unchecked("battery staple".to_string());
            let hashed = password.hash(None).unwrap();
            assert!(!hashed.verify(&other, None));
        }

        #[test]
        fn test_pepper_must_match() {
            let password = ClearTextPassword::new_unchecked("correct horse".to_string());
            let hashed = password.hash(Some(b"pepper")).unwrap();
            assert!(hashed.verify(&password, Some(b"pepper")));
            assert!(!hashed.verify(&password, None));
        }

        #[test]
        fn test_phc_roundtrip() {
            let password = ClearTextPassword::new_unchecked("correct horse".to_string());
            let hashed = password.hash(None).unwrap();
            let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
            assert!(restored.verify(&password, None));
        }

        #[test]
        fn test_invalid_phc_string() {
            assert!(HashedPassword::from_phc_string("not-a-hash").is_err());
        }
    }
}
