//! Check Username Use Case
//!
//! Decides whether a requested username can still be claimed. Content
//! rule failures and taken names are both ordinary verdicts carried in
//! a 200 response; only storage failures surface as errors.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::repository::UserRepository;
use crate::domain::value_object::username::Username;
use crate::error::AuthResult;

/// Outcome of an availability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityVerdict {
    pub available: bool,
    pub message: String,
}

impl AvailabilityVerdict {
    fn available() -> Self {
        Self {
            available: true,
            message: "Username is available".to_string(),
        }
    }

    fn taken() -> Self {
        Self {
            available: false,
            message: "Username is already taken".to_string(),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            available: false,
            message: message.into(),
        }
    }
}

/// Use case: check whether a username is available
#[derive(Clone)]
pub struct CheckUsernameUseCase<U: UserRepository> {
    users: Arc<U>,
}

impl<U: UserRepository> CheckUsernameUseCase<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Validate the requested name, then probe the store for collisions.
    ///
    /// Invalid names never reach the repository.
    pub async fn execute(&self, requested: &str) -> AuthResult<AvailabilityVerdict> {
        let username = match Username::parse(requested) {
            Ok(name) => name,
            Err(rule) => return Ok(AvailabilityVerdict::rejected(rule.to_string())),
        };

        if self.users.exists_by_username(&username).await? {
            tracing::debug!(username = %username, "Username collision");
            return Ok(AvailabilityVerdict::taken());
        }

        Ok(AvailabilityVerdict::available())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use std::collections::HashSet;

    struct FakeUsers {
        taken: HashSet<String>,
        fail: bool,
    }

    impl FakeUsers {
        fn with_taken(names: &[&str]) -> Self {
            Self {
                taken: names.iter().map(|n| n.to_string()).collect(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                taken: HashSet::new(),
                fail: true,
            }
        }
    }

    impl UserRepository for FakeUsers {
        async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
            if self.fail {
                return Err(AuthError::Internal("store offline".into()));
            }
            Ok(self.taken.contains(username.as_str()))
        }
    }

    fn use_case(users: FakeUsers) -> CheckUsernameUseCase<FakeUsers> {
        CheckUsernameUseCase::new(Arc::new(users))
    }

    #[tokio::test]
    async fn test_available_username() {
        let verdict = use_case(FakeUsers::with_taken(&["bob"]))
            .execute("alice")
            .await
            .unwrap();
        assert!(verdict.available);
        assert_eq!(verdict.message, "Username is available");
    }

    #[tokio::test]
    async fn test_taken_username() {
        let verdict = use_case(FakeUsers::with_taken(&["alice"]))
            .execute("alice")
            .await
            .unwrap();
        assert!(!verdict.available);
        assert_eq!(verdict.message, "Username is already taken");
    }

    #[tokio::test]
    async fn test_collision_is_case_insensitive() {
        let verdict = use_case(FakeUsers::with_taken(&["alice"]))
            .execute("ALICE")
            .await
            .unwrap();
        assert!(!verdict.available);
    }

    #[tokio::test]
    async fn test_invalid_name_rejected_without_store_probe() {
        // A failing store proves invalid names short-circuit before it
        let verdict = use_case(FakeUsers::failing()).execute("ab").await.unwrap();
        assert!(!verdict.available);
        assert_eq!(verdict.message, "Username must be at least 3 characters");
    }

    #[tokio::test]
    async fn test_invalid_characters_rejected() {
        let verdict = use_case(FakeUsers::with_taken(&[]))
            .execute("bad name!")
            .await
            .unwrap();
        assert!(!verdict.available);
        assert_eq!(
            verdict.message,
            "Username can only contain letters, numbers, underscores, and hyphens"
        );
    }

    #[tokio::test]
    async fn test_storage_error_propagates() {
        let result = use_case(FakeUsers::failing()).execute("alice").await;
        assert!(result.is_err());
    }
}
