//! Auth Router
//!
//! Assembles the auth HTTP surface.
//!
//! ## Endpoints
//! - `POST /check-username` - Username availability check
//! - `POST /set-password` - Attach a password credential (requires session)
//! - `POST /send-email-verification` - Dispatch a verification email
//! - `GET /session` - Session status

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AccountRepository, SessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{
    AuthAppState, check_username, send_email_verification, session_status, set_password,
};

/// Build the auth router over any repository implementation
pub fn auth_router_generic<R>(repo: Arc<R>, config: Arc<AuthConfig>, mailer: Arc<Mailer>) -> Router
where
    R: UserRepository + AccountRepository + SessionRepository + Send + Sync + 'static,
{
    let state = AuthAppState::new(repo, config, mailer);

    Router::new()
        .route("/check-username", post(check_username::<R>))
        .route("/set-password", post(set_password::<R>))
        .route("/send-email-verification", post(send_email_verification::<R>))
        .route("/session", get(session_status::<R>))
        .with_state(state)
}

/// Build the auth router backed by PostgreSQL
pub fn auth_router(
    repo: PgAuthRepository,
    config: Arc<AuthConfig>,
    mailer: Arc<Mailer>,
) -> Router {
    auth_router_generic(Arc::new(repo), config, mailer)
}
