//! Auth HTTP Handlers
//!
//! Thin adapters between the HTTP surface and the use cases. Content
//! verdicts (invalid/taken usernames) come back as 200 responses;
//! protocol faults (missing fields, no session, conflicts) map to
//! 400/401/409 through `AuthError`.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};

use platform::cookie::{self, CookieConfig};
use platform::mailer::Mailer;

use crate::application::check_username::CheckUsernameUseCase;
use crate::application::config::AuthConfig;
use crate::application::fetch_session::FetchSessionUseCase;
use crate::application::send_verification::SendVerificationUseCase;
use crate::application::set_password::{SetPasswordInput, SetPasswordUseCase};
use crate::domain::repository::{AccountRepository, SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CheckUsernameResponse, SendVerificationRequest, SendVerificationResponse, SetPasswordRequest,
    SetPasswordResponse, SessionStatusResponse,
};

/// Shared state for the auth routes
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub mailer: Arc<Mailer>,
}

impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
            mailer: Arc::clone(&self.mailer),
        }
    }
}

impl<R> AuthAppState<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>, mailer: Arc<Mailer>) -> Self {
        Self {
            repo,
            config,
            mailer,
        }
    }

    fn session_cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.config.session_cookie_name.clone(),
            secure: self.config.cookie_secure,
            http_only: true,
            same_site: self.config.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}

/// Pull the session token from the cookie or an Authorization bearer
fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(token) = cookie::extract_cookie(headers, cookie_name) {
        return Some(token);
    }
    bearer_token(headers)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

// ============================================================================
// POST /check-username
// ============================================================================

/// Check whether a username is available.
///
/// Takes the body as loose JSON so a missing or non-string `username`
/// maps to the required-field fault rather than a deserializer 422.
pub async fn check_username<R>(
    State(state): State<AuthAppState<R>>,
    Json(body): Json<serde_json::Value>,
) -> AuthResult<Json<CheckUsernameResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let requested = body
        .get("username")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AuthError::InvalidInput("Username is required".to_string()))?;

    let verdict = CheckUsernameUseCase::new(Arc::clone(&state.repo))
        .execute(requested)
        .await?;

    Ok(Json(verdict.into()))
}

// ============================================================================
// POST /set-password
// ============================================================================

/// Attach a password credential to the authenticated user's account.
pub async fn set_password<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(body): Json<SetPasswordRequest>,
) -> AuthResult<Json<SetPasswordResponse>>
where
    R: AccountRepository + SessionRepository + Send + Sync + 'static,
{
    let token = extract_session_token(&headers, &state.config.session_cookie_name);
    let status = FetchSessionUseCase::new(Arc::clone(&state.repo), Arc::clone(&state.config))
        .execute(token.as_deref())
        .await?;
    let user_id = status.user_id.ok_or(AuthError::Unauthenticated)?;

    let new_password = body
        .new_password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AuthError::InvalidInput("Password is required".to_string()))?;

    SetPasswordUseCase::new(Arc::clone(&state.repo), Arc::clone(&state.config))
        .execute(SetPasswordInput {
            user_id,
            new_password,
        })
        .await?;

    Ok(Json(SetPasswordResponse {
        success: true,
        message: "Password set successfully".to_string(),
    }))
}

// ============================================================================
// POST /send-email-verification
// ============================================================================

/// Dispatch an email verification message.
pub async fn send_email_verification<R>(
    State(state): State<AuthAppState<R>>,
    Json(body): Json<SendVerificationRequest>,
) -> AuthResult<Json<SendVerificationResponse>>
where
    R: Send + Sync + 'static,
{
    let receipt = SendVerificationUseCase::new(Arc::clone(&state.mailer))
        .execute(body.into())
        .await?;

    Ok(Json(SendVerificationResponse { id: receipt.id }))
}

// ============================================================================
// GET /session
// ============================================================================

/// Report whether the caller holds a live session.
///
/// When a token was presented but no longer resolves to a live session,
/// the response also clears the stale cookie.
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: SessionRepository + Send + Sync + 'static,
{
    let token = extract_session_token(&headers, &state.config.session_cookie_name);
    let had_token = token.is_some();

    let status = FetchSessionUseCase::new(Arc::clone(&state.repo), Arc::clone(&state.config))
        .execute(token.as_deref())
        .await?;

    let body = Json(SessionStatusResponse::from(status));

    if had_token && !status.logged_in {
        let delete = state.session_cookie_config().build_delete_cookie();
        let mut response = body.into_response();
        if let Ok(value) = HeaderValue::from_str(&delete) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
        return Ok(response);
    }

    Ok(body.into_response())
}
