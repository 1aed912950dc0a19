//! Set Password Use Case
//!
//! Lets an authenticated user who signed up through a federated
//! provider attach a password credential to their account. Refused
//! with a conflict when a credential account already exists.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::account::LinkedAccount;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};
use kernel::id::UserId;

/// Input for the set-password operation
#[derive(Debug)]
pub struct SetPasswordInput {
    pub user_id: UserId,
    pub new_password: String,
}

/// Use case: attach a password credential to an existing user
#[derive(Clone)]
pub struct SetPasswordUseCase<A: AccountRepository> {
    accounts: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A: AccountRepository> SetPasswordUseCase<A> {
    pub fn new(accounts: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self { accounts, config }
    }

    /// Validate, hash, and link the new credential.
    ///
    /// Fails with `PasswordValidation` on policy violations and with
    /// `CredentialConflict` when a credential account already exists.
    pub async fn execute(&self, input: SetPasswordInput) -> AuthResult<()> {
        let password = ClearTextPassword::new(input.new_password, self.config.password_policy)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;

        let linked = self.accounts.find_by_user(&input.user_id).await?;
        if linked.iter().any(LinkedAccount::is_credential) {
            return Err(AuthError::CredentialConflict);
        }

        let hash = password
            .hash(self.config.pepper())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {e}")))?;

        let account = LinkedAccount::credential(input.user_id, hash);
        self.accounts.link(&account).await?;

        tracing::info!(user_id = %input.user_id, "Password credential linked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::account::Provider;
    use std::sync::Mutex;

    struct FakeAccounts {
        rows: Mutex<Vec<LinkedAccount>>,
    }

    impl FakeAccounts {
        fn empty() -> Self {
            Self {
                rows: Mutex::new(Vec::new()),
            }
        }

        fn with(rows: Vec<LinkedAccount>) -> Self {
            Self {
                rows: Mutex::new(rows),
            }
        }
    }

    impl AccountRepository for FakeAccounts {
        async fn find_by_user(&self, user_id: &UserId) -> AuthResult<Vec<LinkedAccount>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|a| &a.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn link(&self, account: &LinkedAccount) -> AuthResult<()> {
            self.rows.lock().unwrap().push(account.clone());
            Ok(())
        }
    }

    fn use_case(accounts: FakeAccounts) -> SetPasswordUseCase<FakeAccounts> {
        SetPasswordUseCase::new(Arc::new(accounts), Arc::new(AuthConfig::development()))
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let result = use_case(FakeAccounts::empty())
            .execute(SetPasswordInput {
                user_id: UserId::new(),
                new_password: "short".to_string(),
            })
            .await;

        match result {
            Err(AuthError::PasswordValidation(msg)) => {
                assert_eq!(msg, "Password must be at least 8 characters long");
            }
            other => panic!("expected PasswordValidation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_existing_credential_conflicts() {
        let user_id = UserId::new();
        let accounts = Arc::new(FakeAccounts::empty());
        let use_case = SetPasswordUseCase::new(
            Arc::clone(&accounts),
            Arc::new(AuthConfig::development()),
        );

        use_case
            .execute(SetPasswordInput {
                user_id,
                new_password: "correct horse battery".to_string(),
            })
            .await
            .unwrap();

        let result = use_case
            .execute(SetPasswordInput {
                user_id,
                new_password: "another password 42".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::CredentialConflict)));
    }

    #[tokio::test]
    async fn test_federated_only_user_succeeds() {
        let user_id = UserId::new();
        let accounts = FakeAccounts::with(vec![LinkedAccount::federated(
            user_id,
            Provider::Github,
        )]);

        let result = use_case(accounts)
            .execute(SetPasswordInput {
                user_id,
                new_password: "correct horse battery".to_string(),
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_success_stores_phc_hash() {
        let user_id = UserId::new();
        let accounts = Arc::new(FakeAccounts::empty());
        let use_case = SetPasswordUseCase::new(
            Arc::clone(&accounts),
            Arc::new(AuthConfig::development()),
        );

        use_case
            .execute(SetPasswordInput {
                user_id,
                new_password: "correct horse battery".to_string(),
            })
            .await
            .unwrap();

        let rows = accounts.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_credential());
        let hash = rows[0].password_hash.as_deref().unwrap();
        assert!(hash.starts_with("$argon2"));
    }
}
