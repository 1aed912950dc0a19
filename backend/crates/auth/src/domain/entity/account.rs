//! Linked Account Entity
//!
//! One row per (user, provider) pair. A user signed up through GitHub
//! has a `Github` row; setting a password later adds a `Credential` row
//! alongside it. At most one credential row may exist per user.

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, UserId};
use platform::password::HashedPassword;

/// Identity provider backing a linked account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Email/password credential managed by this service
    Credential,
    /// GitHub OAuth
    Github,
}

impl Provider {
    /// Stable code stored in the database
    pub fn code(&self) -> &'static str {
        match self {
            Self::Credential => "credential",
            Self::Github => "github",
        }
    }

    /// Parse a stored provider code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "credential" => Some(Self::Credential),
            "github" => Some(Self::Github),
            _ => None,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Account linked to a user via some provider
#[derive(Debug, Clone)]
pub struct LinkedAccount {
    pub account_id: AccountId,
    pub user_id: UserId,
    pub provider: Provider,
    /// PHC-formatted hash; present only for credential accounts
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LinkedAccount {
    /// Create a credential account carrying a password hash
    pub fn credential(user_id: UserId, password_hash: HashedPassword) -> Self {
        Self {
            account_id: AccountId::new(),
            user_id,
            provider: Provider::Credential,
            password_hash: Some(password_hash.as_phc_string().to_string()),
            created_at: Utc::now(),
        }
    }

    /// Create a federated (OAuth) account
    pub fn federated(user_id: UserId, provider: Provider) -> Self {
        Self {
            account_id: AccountId::new(),
            user_id,
            provider,
            password_hash: None,
            created_at: Utc::now(),
        }
    }

    /// Whether this account is the password credential
    pub fn is_credential(&self) -> bool {
        self.provider == Provider::Credential
    }
}
