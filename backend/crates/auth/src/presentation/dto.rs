//! Data Transfer Objects
//!
//! Request/response types for the auth HTTP surface. Field names are
//! camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::application::check_username::AvailabilityVerdict;
use crate::application::fetch_session::SessionStatus;
use crate::application::send_verification::{SendVerificationInput, VerificationRecipient};

// ============================================================================
// Check Username
// ============================================================================

/// Response for POST /check-username
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckUsernameResponse {
    pub available: bool,
    pub message: String,
}

impl From<AvailabilityVerdict> for CheckUsernameResponse {
    fn from(verdict: AvailabilityVerdict) -> Self {
        Self {
            available: verdict.available,
            message: verdict.message,
        }
    }
}

// ============================================================================
// Set Password
// ============================================================================

/// Request for POST /set-password
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPasswordRequest {
    /// Absent and empty both mean "not provided"
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Response for POST /set-password
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPasswordResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Send Email Verification
// ============================================================================

/// Recipient block in the verification request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationUserDto {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}

/// Request for POST /send-email-verification
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationRequest {
    pub user: VerificationUserDto,
    pub subject: String,
    pub verification_url: String,
    pub token: String,
}

impl From<SendVerificationRequest> for SendVerificationInput {
    fn from(req: SendVerificationRequest) -> Self {
        Self {
            user: VerificationRecipient {
                name: req.user.name,
                email: req.user.email,
            },
            subject: req.subject,
            verification_url: req.verification_url,
            token: req.token,
        }
    }
}

/// Response for POST /send-email-verification
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationResponse {
    /// Provider-assigned message ID, when reported
    pub id: Option<String>,
}

// ============================================================================
// Session Status
// ============================================================================

/// Response for GET /session
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub logged_in: bool,
}

impl From<SessionStatus> for SessionStatusResponse {
    fn from(status: SessionStatus) -> Self {
        Self {
            logged_in: status.logged_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_username_response_is_camel_case() {
        let response = CheckUsernameResponse {
            available: true,
            message: "Username is available".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["available"], true);
        assert_eq!(json["message"], "Username is available");
    }

    #[test]
    fn test_set_password_request_tolerates_missing_field() {
        let req: SetPasswordRequest = serde_json::from_str("{}").unwrap();
        assert!(req.new_password.is_none());

        let req: SetPasswordRequest =
            serde_json::from_str(r#"{"newPassword":"hunter2hunter2"}"#).unwrap();
        assert_eq!(req.new_password.as_deref(), Some("hunter2hunter2"));
    }

    #[test]
    fn test_send_verification_request_shape() {
        let req: SendVerificationRequest = serde_json::from_str(
            r#"{
                "user": {"name": "Alice", "email": "alice@example.com"},
                "subject": "Verify your email",
                "verificationUrl": "https://app.example.com/verify?token=abc",
                "token": "abc"
            }"#,
        )
        .unwrap();
        assert_eq!(req.user.name.as_deref(), Some("Alice"));
        assert_eq!(req.verification_url, "https://app.example.com/verify?token=abc");
    }

    #[test]
    fn test_session_status_wire_name() {
        let json = serde_json::to_value(SessionStatusResponse { logged_in: false }).unwrap();
        assert_eq!(json["loggedIn"], false);
    }
}
