// config.rs
use std::env;

use crate::errors::{AppError, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the ticketing backend, without trailing slash.
    pub api_base_url: String,
    pub port: u16,
    pub host: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| AppError::configuration("PORT must be a number"))?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Self::new(api_base_url, host, port))
    }

    pub fn new(api_base_url: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        AppConfig {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            port,
            host: host.into(),
        }
    }

    /// Joins an API path such as `/otp/generate` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
