//! Application Layer
//!
//! Use cases orchestrating domain objects and repositories.

pub mod check_username;
pub mod config;
pub mod fetch_session;
pub mod send_verification;
pub mod set_password;

pub use check_username::{AvailabilityVerdict, CheckUsernameUseCase};
pub use config::AuthConfig;
pub use fetch_session::{FetchSessionUseCase, SessionStatus};
pub use send_verification::{SendVerificationInput, SendVerificationUseCase, VerificationRecipient};
pub use set_password::{SetPasswordInput, SetPasswordUseCase};
