//! Transactional Email Dispatch
//!
//! Thin client for a managed email provider's JSON API. The provider is
//! an external collaborator; this module only shapes the request, carries
//! the credentials, and maps the provider's verdict.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default provider endpoint (Resend-compatible API)
pub const DEFAULT_MAIL_ENDPOINT: &str = "https://api.resend.com/emails";

/// Mailer configuration
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Provider API endpoint
    pub endpoint: String,
    /// Bearer token for the provider
    pub api_key: String,
    /// Sender address, e.g. `App Auth <no-reply@example.com>`
    pub from: String,
}

impl MailerConfig {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_MAIL_ENDPOINT.to_string(),
            api_key: api_key.into(),
            from: from.into(),
        }
    }
}

/// An email ready for dispatch
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Request body sent to the provider
#[derive(Debug, Serialize)]
struct SendPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Provider's send result
#[derive(Debug, Clone, Deserialize)]
pub struct SendReceipt {
    /// Provider-assigned message ID, when reported
    #[serde(default)]
    pub id: Option<String>,
}

/// Email dispatch errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// Request never completed (DNS, TLS, timeout, ...)
    #[error("Email transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Email provider rejected the message (status {status})")]
    Rejected { status: u16, detail: String },
}

/// Email provider client
#[derive(Debug, Clone)]
pub struct Mailer {
    http: reqwest::Client,
    config: MailerConfig,
}

impl Mailer {
    pub fn new(config: MailerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Dispatch a single transactional email.
    ///
    /// Returns the provider's receipt on success. Non-2xx responses are
    /// returned as `MailerError::Rejected` with the provider's body kept
    /// for server-side logging.
    pub async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt, MailerError> {
        let payload = SendPayload {
            from: &self.config.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), detail = %detail, "Email provider rejected message");
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        let receipt = response.json::<SendReceipt>().await?;

        tracing::info!(
            to = %email.to,
            message_id = receipt.id.as_deref().unwrap_or("-"),
            "Verification email dispatched"
        );

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let payload = SendPayload {
            from: "Auth <no-reply@example.com>",
            to: "alice@example.com",
            subject: "Verify your email",
            html: "<p>hi</p>",
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["from"], "Auth <no-reply@example.com>");
        assert_eq!(json["to"], "alice@example.com");
        assert_eq!(json["subject"], "Verify your email");
        assert_eq!(json["html"], "<p>hi</p>");
    }

    #[test]
    fn test_receipt_tolerates_missing_id() {
        let receipt: SendReceipt = serde_json::from_str("{}").unwrap();
        assert!(receipt.id.is_none());

        let receipt: SendReceipt = serde_json::from_str(r#"{"id":"msg_123"}"#).unwrap();
        assert_eq!(receipt.id.as_deref(), Some("msg_123"));
    }

    #[test]
    fn test_config_defaults_endpoint() {
        let config = MailerConfig::new("key", "Auth <no-reply@example.com>");
        assert_eq!(config.endpoint, DEFAULT_MAIL_ENDPOINT);
    }
}
