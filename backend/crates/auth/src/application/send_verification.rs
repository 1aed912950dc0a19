//! Send Verification Email Use Case
//!
//! Renders the verification email body and hands it to the mail
//! provider. The caller supplies the verification URL and token; this
//! use case does not mint tokens itself.

use std::sync::Arc;

use platform::mailer::{Mailer, OutboundEmail, SendReceipt};

use crate::error::{AuthError, AuthResult};

/// Recipient of a verification email
#[derive(Debug, Clone)]
pub struct VerificationRecipient {
    pub name: Option<String>,
    pub email: String,
}

/// Input for the verification dispatch
#[derive(Debug, Clone)]
pub struct SendVerificationInput {
    pub user: VerificationRecipient,
    pub subject: String,
    pub verification_url: String,
    pub token: String,
}

/// Use case: dispatch an email verification message
#[derive(Clone)]
pub struct SendVerificationUseCase {
    mailer: Arc<Mailer>,
}

impl SendVerificationUseCase {
    pub fn new(mailer: Arc<Mailer>) -> Self {
        Self { mailer }
    }

    /// Render and send the verification email.
    pub async fn execute(&self, input: SendVerificationInput) -> AuthResult<SendReceipt> {
        let html = render_verification_html(&input);

        let email = OutboundEmail {
            to: input.user.email,
            subject: input.subject,
            html,
        };

        self.mailer
            .send(&email)
            .await
            .map_err(|e| AuthError::Mail(e.to_string()))
    }
}

/// Render the verification email body.
///
/// Greets by display name when present, falls back to the email
/// address. The token is repeated in plain text for clients that strip
/// links.
fn render_verification_html(input: &SendVerificationInput) -> String {
    let greeting_name = input
        .user
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(&input.user.email);

    format!(
        "<div>\
            <h1>Verify your email address</h1>\
            <p>Hi {greeting_name},</p>\
            <p>Please confirm your email address by clicking the link below:</p>\
            <p><a href=\"{url}\">Verify email</a></p>\
            <p>If the link does not work, use this verification token: <code>{token}</code></p>\
            <p>If you did not request this, you can safely ignore this email.</p>\
        </div>",
        url = input.verification_url,
        token = input.token,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: Option<&str>) -> SendVerificationInput {
        SendVerificationInput {
            user: VerificationRecipient {
                name: name.map(String::from),
                email: "alice@example.com".to_string(),
            },
            subject: "Verify your email".to_string(),
            verification_url: "https://app.example.com/verify?token=abc123".to_string(),
            token: "abc123".to_string(),
        }
    }

    #[test]
    fn test_render_greets_by_name() {
        let html = render_verification_html(&input(Some("Alice")));
        assert!(html.contains("Hi Alice,"));
    }

    #[test]
    fn test_render_falls_back_to_email() {
        let html = render_verification_html(&input(None));
        assert!(html.contains("Hi alice@example.com,"));
    }

    #[test]
    fn test_render_blank_name_falls_back_to_email() {
        let html = render_verification_html(&input(Some("   ")));
        assert!(html.contains("Hi alice@example.com,"));
    }

    #[test]
    fn test_render_includes_link_and_token() {
        let html = render_verification_html(&input(Some("Alice")));
        assert!(html.contains("href=\"https://app.example.com/verify?token=abc123\""));
        assert!(html.contains("<code>abc123</code>"));
    }
}
