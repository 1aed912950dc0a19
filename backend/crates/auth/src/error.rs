//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Username content rules are NOT represented here: a username failing
//! validation is a normal availability verdict, not an error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing request field
    #[error("{0}")]
    InvalidInput(String),

    /// Password fails the acceptance policy
    #[error("{0}")]
    PasswordValidation(String),

    /// No valid session for a protected operation
    #[error("You must be signed in to set a password")]
    Unauthenticated,

    /// A password credential already exists for this account.
    /// This is the account-linking business rule, not a fault.
    #[error("A credential account already exists for this user")]
    CredentialConflict,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Email provider error
    #[error("Email dispatch failed: {0}")]
    Mail(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidInput(_) | AuthError::PasswordValidation(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::CredentialConflict => StatusCode::CONFLICT,
            AuthError::Mail(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput(_) | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::CredentialConflict => ErrorKind::Conflict,
            AuthError::Mail(_) => ErrorKind::ServiceUnavailable,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Backend failures get a generic user-facing message; the detail
    /// stays in the server log only.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) => AppError::internal("Failed to query the account store"),
            AuthError::Mail(_) => {
                AppError::service_unavailable("Failed to send verification email")
            }
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Mail(msg) => {
                tracing::error!(message = %msg, "Email dispatch error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Unauthenticated => {
                tracing::warn!("Protected operation without a valid session");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::InvalidInput("Username is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::PasswordValidation("too short".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::CredentialConflict.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_backend_errors_hide_detail() {
        let err = AuthError::Database(sqlx::Error::PoolClosed);
        let app = err.to_app_error();
        assert!(!app.message().contains("Pool"));
        assert_eq!(app.status_code(), 500);
    }

    #[test]
    fn test_client_errors_keep_message() {
        let err = AuthError::InvalidInput("Username is required".into());
        assert_eq!(err.to_app_error().message(), "Username is required");

        let err = AuthError::CredentialConflict;
        assert_eq!(
            err.to_app_error().message(),
            "A credential account already exists for this user"
        );
    }
}
