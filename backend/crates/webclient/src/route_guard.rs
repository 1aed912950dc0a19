//! Route Guard
//!
//! Navigation interceptor enforcing audience policy per route. Each
//! evaluation refreshes session truth through a [`SessionFetcher`]
//! before applying the rules, so decisions never run on a stale flag.
//!
//! ## Rules, first match wins
//! 1. Route opted out of guarding: allow
//! 2. Guest-only route, user logged in: redirect to `redirect_user_to`
//! 3. User-only route, user logged out: redirect to `redirect_guest_to`
//! 4. No audience set, user logged out: redirect to `redirect_guest_to`
//! 5. Otherwise: allow
//!
//! A redirect whose target equals the current path is downgraded to
//! allow, which is what breaks redirect loops.

use std::sync::Arc;

/// Who a route is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Only unauthenticated visitors (login, signup pages)
    Guest,
    /// Only authenticated users
    User,
}

/// Fully resolved guard policy for one route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAuthPolicy {
    pub only: Option<Audience>,
    /// Where to send a logged-in user who hit a guest-only route
    pub redirect_user_to: String,
    /// Where to send a guest who hit a protected route
    pub redirect_guest_to: String,
}

impl Default for RouteAuthPolicy {
    fn default() -> Self {
        Self {
            only: None,
            redirect_user_to: "/".to_string(),
            redirect_guest_to: "/login".to_string(),
        }
    }
}

/// Partial policy attached to a route; unset fields fall back to the
/// process-wide defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyOverride {
    pub only: Option<Audience>,
    pub redirect_user_to: Option<String>,
    pub redirect_guest_to: Option<String>,
}

impl PolicyOverride {
    /// Merge this override onto a base policy, field by field
    pub fn merged_with(&self, base: &RouteAuthPolicy) -> RouteAuthPolicy {
        RouteAuthPolicy {
            only: self.only.or(base.only),
            redirect_user_to: self
                .redirect_user_to
                .clone()
                .unwrap_or_else(|| base.redirect_user_to.clone()),
            redirect_guest_to: self
                .redirect_guest_to
                .clone()
                .unwrap_or_else(|| base.redirect_guest_to.clone()),
        }
    }
}

/// Route-level auth metadata set by the routing layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAuthMeta {
    /// Guarding disabled for this route, defaults notwithstanding
    Disabled,
    /// Guarded with the given overrides
    Guarded(PolicyOverride),
}

impl Default for RouteAuthMeta {
    fn default() -> Self {
        Self::Guarded(PolicyOverride::default())
    }
}

/// Source of current session truth
#[trait_variant::make(SessionFetcher: Send)]
pub trait LocalSessionFetcher {
    /// Refresh and report whether the user is logged in
    async fn fetch_session(&self) -> bool;
}

/// Guard decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(String),
}

/// Navigation guard over a session source and default policy
pub struct RouteGuard<S> {
    sessions: Arc<S>,
    defaults: RouteAuthPolicy,
}

impl<S> RouteGuard<S>
where
    S: SessionFetcher + Sync,
{
    pub fn new(sessions: Arc<S>) -> Self {
        Self::with_defaults(sessions, RouteAuthPolicy::default())
    }

    pub fn with_defaults(sessions: Arc<S>, defaults: RouteAuthPolicy) -> Self {
        Self { sessions, defaults }
    }

    /// Evaluate a navigation to `path` under the route's metadata.
    pub async fn evaluate(&self, path: &str, meta: &RouteAuthMeta) -> GuardOutcome {
        let overrides = match meta {
            RouteAuthMeta::Disabled => return GuardOutcome::Allow,
            RouteAuthMeta::Guarded(overrides) => overrides,
        };

        let policy = overrides.merged_with(&self.defaults);

        // Session truth is refreshed per evaluation, never cached here
        let logged_in = self.sessions.fetch_session().await;

        match policy.only {
            Some(Audience::Guest) if logged_in => {
                redirect_unless(path, policy.redirect_user_to)
            }
            Some(Audience::User) if !logged_in => {
                redirect_unless(path, policy.redirect_guest_to)
            }
            None if !logged_in => redirect_unless(path, policy.redirect_guest_to),
            _ => GuardOutcome::Allow,
        }
    }
}

/// Redirect to `target`, unless we are already there
fn redirect_unless(current_path: &str, target: String) -> GuardOutcome {
    if current_path == target {
        GuardOutcome::Allow
    } else {
        GuardOutcome::Redirect(target)
    }
}
