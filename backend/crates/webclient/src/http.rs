//! Gateway HTTP Transport
//!
//! `ApiClient` speaks to the auth gateway endpoints and backs both the
//! availability probe and the session fetcher. Structured faults from
//! the server (RFC 7807 bodies) surface with their `detail` message;
//! transport failures degrade to the generic fallback or, for session
//! fetches, to logged-out.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::route_guard::SessionFetcher;
use crate::username_check::{AvailabilityProbe, CheckVerdict, ProbeError};

/// Client construction errors
#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// Problem document returned by the gateway on faults
#[derive(Debug, Deserialize)]
struct ProblemBody {
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionBody {
    logged_in: bool,
}

/// HTTP client for the auth gateway
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiClientError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProbeError> {
        self.base_url
            .join(path)
            .map_err(|e| ProbeError::Transport(e.to_string()))
    }
}

impl AvailabilityProbe for ApiClient {
    async fn check(&self, username: &str) -> Result<CheckVerdict, ProbeError> {
        let url = self.endpoint("check-username")?;

        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "username": username }))
            .send()
            .await
            .map_err(|e| ProbeError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the server's own fault message when it sent one
            let detail = response
                .json::<ProblemBody>()
                .await
                .ok()
                .and_then(|p| p.detail);
            return Err(match detail {
                Some(message) => ProbeError::Api { message },
                None => ProbeError::Transport(format!("status {status}")),
            });
        }

        response
            .json::<CheckVerdict>()
            .await
            .map_err(|e| ProbeError::Transport(e.to_string()))
    }
}

impl SessionFetcher for ApiClient {
    /// Fetch session status; any failure reads as logged out.
    async fn fetch_session(&self) -> bool {
        let url = match self.base_url.join("session") {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, "Bad session endpoint URL");
                return false;
            }
        };

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Session fetch failed, treating as logged out");
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Session fetch rejected");
            return false;
        }

        match response.json::<SessionBody>().await {
            Ok(body) => body.logged_in,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed session response");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(ApiClient::new("not a url").is_err());
    }

    #[test]
    fn test_joins_endpoints_against_base() {
        let client = ApiClient::new("https://api.example.com/auth/").unwrap();
        let url = client.endpoint("check-username").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/auth/check-username");
    }

    #[test]
    fn test_problem_body_detail_optional() {
        let problem: ProblemBody = serde_json::from_str("{}").unwrap();
        assert!(problem.detail.is_none());

        let problem: ProblemBody =
            serde_json::from_str(r#"{"detail":"Username is required"}"#).unwrap();
        assert_eq!(problem.detail.as_deref(), Some("Username is required"));
    }

    #[test]
    fn test_session_body_wire_name() {
        let body: SessionBody = serde_json::from_str(r#"{"loggedIn":true}"#).unwrap();
        assert!(body.logged_in);
    }
}
