//! Web Client Support Module
//!
//! Client-side plumbing for frontends talking to the auth gateway:
//! - Debounced username availability checking with shared state
//! - Route guard evaluation (audience policies, redirect loop guard)
//! - HTTP transport for the gateway endpoints

pub mod http;
pub mod route_guard;
pub mod username_check;

pub use http::ApiClient;
pub use route_guard::{
    Audience, GuardOutcome, PolicyOverride, RouteAuthMeta, RouteAuthPolicy, RouteGuard,
};
pub use username_check::{AvailabilityProbe, CheckState, CheckVerdict, UsernameChecker};
