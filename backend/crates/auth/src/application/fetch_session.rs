//! Fetch Session Use Case
//!
//! Resolves a bearer token or session cookie to a logged-in/logged-out
//! status. Token format is `<session_id>.<signature>` where the
//! signature is base64url (no padding) over the session id with
//! HMAC-SHA256. Anything that fails to parse or verify is simply a
//! logged-out status, never an error.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;
use kernel::id::{SessionId, UserId};

type HmacSha256 = Hmac<Sha256>;

/// Session lookup outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    pub logged_in: bool,
    pub user_id: Option<UserId>,
}

impl SessionStatus {
    pub fn logged_out() -> Self {
        Self {
            logged_in: false,
            user_id: None,
        }
    }

    fn logged_in(user_id: UserId) -> Self {
        Self {
            logged_in: true,
            user_id: Some(user_id),
        }
    }
}

/// Build a signed session token from a session id
pub fn sign_session_token(session_id: &SessionId, secret: &[u8]) -> String {
    let id = session_id.as_uuid().to_string();
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(id.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
    format!("{id}.{signature}")
}

/// Parse and verify a session token, returning the session id
fn verify_session_token(token: &str, secret: &[u8]) -> Option<SessionId> {
    let (id_part, signature_part) = token.split_once('.')?;
    let uuid = Uuid::parse_str(id_part).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(id_part.as_bytes());
    let signature = URL_SAFE_NO_PAD.decode(signature_part).ok()?;
    mac.verify_slice(&signature).ok()?;

    Some(SessionId::from_uuid(uuid))
}

/// Use case: resolve a session token to its status
#[derive(Clone)]
pub struct FetchSessionUseCase<S: SessionRepository> {
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S: SessionRepository> FetchSessionUseCase<S> {
    pub fn new(sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { sessions, config }
    }

    /// Resolve an optional token to a session status.
    ///
    /// Expired sessions are deleted on sight so the store does not
    /// accumulate rows the cleanup job has not reached yet.
    pub async fn execute(&self, token: Option<&str>) -> AuthResult<SessionStatus> {
        let Some(token) = token else {
            return Ok(SessionStatus::logged_out());
        };

        let Some(session_id) = verify_session_token(token, &self.config.session_secret) else {
            tracing::debug!("Session token failed verification");
            return Ok(SessionStatus::logged_out());
        };

        let Some(session) = self.sessions.find_by_id(&session_id).await? else {
            return Ok(SessionStatus::logged_out());
        };

        if session.is_expired() {
            self.sessions.delete(&session_id).await?;
            tracing::debug!(session_id = %session_id, "Expired session purged");
            return Ok(SessionStatus::logged_out());
        }

        Ok(SessionStatus::logged_in(session.user_id))
    }
}
