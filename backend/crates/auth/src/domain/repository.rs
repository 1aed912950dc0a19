//! Repository Traits
//!
//! Async persistence contracts implemented by the infra layer. Use
//! cases depend on these traits, never on a concrete store.

use crate::domain::entity::account::LinkedAccount;
use crate::domain::entity::session::Session;
use crate::domain::value_object::username::Username;
use crate::error::AuthResult;
use kernel::id::{SessionId, UserId};

/// User lookups needed by the availability check
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Whether any user already holds this username (canonical form)
    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool>;
}

/// Linked account persistence
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// All accounts linked to a user
    async fn find_by_user(&self, user_id: &UserId) -> AuthResult<Vec<LinkedAccount>>;

    /// Persist a new linked account
    async fn link(&self, account: &LinkedAccount) -> AuthResult<()>;
}

/// Session persistence
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Look up a session by id
    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<Session>>;

    /// Remove a session
    async fn delete(&self, session_id: &SessionId) -> AuthResult<()>;

    /// Remove all expired sessions, returning how many were deleted
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
