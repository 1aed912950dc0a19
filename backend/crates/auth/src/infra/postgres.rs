//! PostgreSQL Auth Repository
//!
//! Implements the domain repository traits on top of sqlx. One struct
//! covers users, accounts, and sessions; the tables are small and the
//! queries short enough that splitting stores would be ceremony.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::account::{LinkedAccount, Provider};
use crate::domain::entity::session::Session;
use crate::domain::repository::{AccountRepository, SessionRepository, UserRepository};
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};
use kernel::id::{AccountId, SessionId, UserId};

/// PostgreSQL-backed auth repository
#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    user_id: Uuid,
    provider: String,
    password_hash: Option<String>,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_entity(self) -> AuthResult<LinkedAccount> {
        let provider = Provider::from_code(&self.provider).ok_or_else(|| {
            AuthError::Internal(format!("Unknown provider code in store: {}", self.provider))
        })?;

        Ok(LinkedAccount {
            account_id: AccountId::from_uuid(self.account_id),
            user_id: UserId::from_uuid(self.user_id),
            provider,
            password_hash: self.password_hash,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Uuid,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_entity(self) -> Session {
        Session {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
        }
    }
}

// ============================================================================
// Trait implementations
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn exists_by_username(&self, username: &Username) -> AuthResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username_canonical = $1)",
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

impl AccountRepository for PgAuthRepository {
    async fn find_by_user(&self, user_id: &UserId) -> AuthResult<Vec<LinkedAccount>> {
        let rows: Vec<AccountRow> = sqlx::query_as(
            "SELECT account_id, user_id, provider, password_hash, created_at
             FROM accounts
             WHERE user_id = $1
             ORDER BY created_at",
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AccountRow::into_entity).collect()
    }

    async fn link(&self, account: &LinkedAccount) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO accounts (account_id, user_id, provider, password_hash, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(account.account_id.as_uuid())
        .bind(account.user_id.as_uuid())
        .bind(account.provider.code())
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl SessionRepository for PgAuthRepository {
    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<Session>> {
        let row: Option<SessionRow> = sqlx::query_as(
            "SELECT session_id, user_id, expires_at_ms, created_at
             FROM auth_sessions
             WHERE session_id = $1",
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_entity))
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let result = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected();
        if deleted > 0 {
            tracing::info!(deleted, "Expired sessions cleaned up");
        }
        Ok(deleted)
    }
}
