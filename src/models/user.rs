use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::loose;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(default, deserialize_with = "loose::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Password confirmation does not match"))]
    pub password_confirmation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Password confirmation does not match"))]
    pub password_confirmation: String,
}

/// `data` of a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthData {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegistrationRequest {
        RegistrationRequest {
            name: "Sari".to_string(),
            email: "sari@example.com".to_string(),
            password: "rahasia123".to_string(),
            password_confirmation: "rahasia123".to_string(),
            phone: None,
        }
    }

    #[test]
    fn registration_policy() {
        assert!(registration().validate().is_ok());

        let mut short = registration();
        short.password = "short".to_string();
        short.password_confirmation = "short".to_string();
        assert!(short.validate().is_err());

        let mut mismatch = registration();
        mismatch.password_confirmation = "rahasia124".to_string();
        assert!(mismatch.validate().is_err());

        let mut bad_email = registration();
        bad_email.email = "sari-at-example".to_string();
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn login_requires_password() {
        let req = LoginRequest {
            email: "admin@example.com".to_string(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
