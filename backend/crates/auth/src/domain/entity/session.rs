//! Session Entity
//!
//! A server-side session row. The browser only ever holds the signed
//! token form (`<session_id>.<signature>`); the row here is the source
//! of truth for expiry.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{SessionId, UserId};

/// Authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: SessionId,
    pub user_id: UserId,
    /// Expiry as unix epoch milliseconds
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for a user with the given time-to-live
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            session_id: SessionId::new(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    /// Whether the session has passed its expiry instant
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() >= self.expires_at_ms
    }
}
