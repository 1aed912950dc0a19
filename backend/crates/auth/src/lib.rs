//! Auth Boundary Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Value objects, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Username availability checks against the uniqueness store
//! - Password credential linking for accounts created via OAuth
//! - Session status lookup with HMAC-signed cookie tokens
//! - Transactional email verification dispatch
//!
//! ## Design
//! - Validation verdicts (username content rules) are normal responses,
//!   never errors; only malformed requests and backend failures error out
//! - The gateway state is constructed once at startup and injected into
//!   handlers; there is no lazily-initialized global

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
