use serde::{Deserialize, Serialize};

/// `{success, message?, data?}` wrapper used by every backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

// A bare `{data: [...]}` listing carries no `success` flag
fn default_success() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OtpIssued {
    #[serde(default)]
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OtpRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyResetOtpRequest<'a> {
    pub email: &'a str,
    pub otp_code: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordBody<'a> {
    pub email: &'a str,
    pub otp_code: &'a str,
    pub password: &'a str,
    pub password_confirmation: &'a str,
}
