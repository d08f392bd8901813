// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Shown to the user whenever the backend gave us nothing better to say.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum AppError {
    // Local validation, never sent to the backend
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    InvalidOtpCode(String),

    #[error("{0}")]
    OtpExpired(String),

    #[error("{0}")]
    OtpStateConflict(String),

    // Backend said no; message is surfaced verbatim
    #[error("{message}")]
    BackendRejected { status: u16, message: String },

    // Transport failure, always the generic message
    #[error("{}", GENERIC_FAILURE_MESSAGE)]
    Network(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Not logged in")]
    Unauthorized,

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "Validation failed"),
            AppError::InvalidOtpCode(_) => (StatusCode::BAD_REQUEST, "Invalid OTP code"),
            AppError::OtpExpired(_) => (StatusCode::GONE, "OTP expired"),
            AppError::OtpStateConflict(_) => (StatusCode::CONFLICT, "OTP flow conflict"),
            AppError::BackendRejected { status, .. } => (
                StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_REQUEST),
                "Request rejected",
            ),
            AppError::Network(detail) => {
                tracing::error!("Backend unreachable: {}", detail);
                (StatusCode::BAD_GATEWAY, "Backend unreachable")
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AppError::ConfigurationError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(format!("HTTP request failed: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Report the first field message, which is what the form shows inline
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid input".to_string());
        AppError::ValidationError(message)
    }
}

// Helper conversion functions
impl AppError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn backend(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        AppError::BackendRejected { status, message }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::ConfigurationError(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    /// True for failures decided locally, before any backend call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_)
                | AppError::InvalidOtpCode(_)
                | AppError::OtpExpired(_)
                | AppError::OtpStateConflict(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_falls_back_to_generic_message() {
        let err = AppError::backend(422, None);
        assert_eq!(err.to_string(), GENERIC_FAILURE_MESSAGE);

        let err = AppError::backend(422, Some("   ".to_string()));
        assert_eq!(err.to_string(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn backend_error_keeps_message_verbatim() {
        let err = AppError::backend(429, Some("Too many OTP requests".to_string()));
        assert_eq!(err.to_string(), "Too many OTP requests");
        assert!(!err.is_local());
    }

    #[test]
    fn network_error_shows_generic_message() {
        let err = AppError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn backend_status_maps_to_response_status() {
        let resp = AppError::backend(429, None).into_response();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

        // A 2xx with success=false still has to look like a failure
        let resp = AppError::backend(200, None).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
