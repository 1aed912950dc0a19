//! Auth Gateway Configuration
//!
//! Assembled once at startup from the environment and injected into the
//! router state. Nothing here is read lazily at request time.

use platform::cookie::SameSite;
use platform::password::PasswordPolicy;
use rand::RngCore;

/// OAuth client credentials for a federated provider
#[derive(Debug, Clone)]
pub struct OAuthClient {
    pub client_id: String,
    pub client_secret: String,
}

/// Configuration for the auth gateway
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Name of the session cookie
    pub session_cookie_name: String,

    /// HMAC key for session token signatures
    pub session_secret: [u8; 32],

    /// Whether session cookies require HTTPS
    pub cookie_secure: bool,

    /// SameSite attribute for session cookies
    pub cookie_same_site: SameSite,

    /// Password acceptance policy
    pub password_policy: PasswordPolicy,

    /// Optional server-side pepper mixed into password hashing
    pub password_pepper: Option<Vec<u8>>,

    /// Public base URL of this deployment (used in verification links)
    pub base_url: Option<String>,

    /// GitHub OAuth client, when federated sign-in is enabled
    pub github_oauth: Option<OAuthClient>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "auth_session".to_string(),
            session_secret: [0u8; 32],
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_policy: PasswordPolicy::Standard,
            password_pepper: None,
            base_url: None,
            github_oauth: None,
        }
    }
}

impl AuthConfig {
    /// Default configuration with a freshly generated session secret
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            session_secret: secret,
            ..Self::default()
        }
    }

    /// Development preset: random secret, insecure cookies allowed
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Pepper bytes for password hashing, if configured
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cookie_name() {
        let config = AuthConfig::default();
        assert_eq!(config.session_cookie_name, "auth_session");
        assert!(config.cookie_secure);
    }

    #[test]
    fn test_random_secret_differs() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_ne!(a.session_secret, b.session_secret);
    }

    #[test]
    fn test_development_allows_insecure_cookies() {
        assert!(!AuthConfig::development().cookie_secure);
    }
}
