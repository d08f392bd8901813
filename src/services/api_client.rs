// services/api_client.rs
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::api::{
    ApiEnvelope, OtpIssued, OtpRequest, ResetPasswordBody, VerifyResetOtpRequest,
};
use crate::models::participant::Participant;
use crate::models::user::{AuthData, LoginRequest, RegistrationRequest};
use crate::services::session::SessionStore;

/// Calls into the ticketing backend. One method per endpoint.
#[async_trait]
pub trait TicketingApi: Send + Sync {
    async fn generate_otp(&self, email: &str) -> Result<OtpIssued>;
    async fn resend_otp(&self, email: &str) -> Result<OtpIssued>;
    async fn verify_register(
        &self,
        registration: &RegistrationRequest,
        otp_code: &str,
    ) -> Result<AuthData>;
    async fn forgot_password(&self, email: &str) -> Result<()>;
    async fn verify_reset_otp(&self, email: &str, otp_code: &str) -> Result<()>;
    async fn reset_password(
        &self,
        email: &str,
        otp_code: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<()>;
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthData>;
    async fn list_participants(&self) -> Result<Vec<Participant>>;
}

#[derive(Serialize)]
struct VerifyRegisterBody<'a> {
    #[serde(flatten)]
    registration: &'a RegistrationRequest,
    otp_code: &'a str,
}

#[derive(Clone)]
pub struct HttpTicketingApi {
    config: AppConfig,
    client: Client,
    session: SessionStore,
}

impl HttpTicketingApi {
    // No timeout on purpose: failures surface from the transport, never retried
    pub fn new(config: AppConfig, session: SessionStore) -> Self {
        HttpTicketingApi {
            config,
            client: Client::new(),
            session,
        }
    }

    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(header::ACCEPT, "application/json");
        match self.session.token().await {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        info!("POST {}", url);
        let request = self.authorized(self.client.post(&url).json(body)).await;
        self.send(path, request).await
    }

    async fn get<T>(&self, path: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        info!("GET {}", url);
        let request = self.authorized(self.client.get(&url)).await;
        self.send(path, request).await
    }

    async fn send<T>(&self, path: &str, request: RequestBuilder) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            error!("{} failed: {}", path, e);
            AppError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        decode_envelope(path, status.as_u16(), &body)
    }
}

/// Turns a raw backend reply into `data`, or the backend's own error message.
pub fn decode_envelope<T>(path: &str, status: u16, body: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let envelope = serde_json::from_str::<ApiEnvelope<T>>(body);
    let ok_status = (200..300).contains(&status);

    match envelope {
        Ok(envelope) if ok_status && envelope.success => Ok(envelope.data),
        Ok(envelope) => {
            warn!("{} rejected ({}): {:?}", path, status, envelope.message);
            Err(AppError::backend(status, envelope.message))
        }
        Err(e) if ok_status => {
            error!("{} returned an unreadable body: {}", path, e);
            Err(AppError::Network(format!("Malformed response from {}: {}", path, e)))
        }
        Err(_) => {
            // Error pages without a JSON body; try to pull out just the message
            let message = serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from));
            warn!("{} rejected ({}) without an envelope", path, status);
            Err(AppError::backend(status, message))
        }
    }
}

fn required<T>(path: &str, data: Option<T>) -> Result<T> {
    data.ok_or_else(|| AppError::Network(format!("Response from {} has no data", path)))
}

#[async_trait]
impl TicketingApi for HttpTicketingApi {
    async fn generate_otp(&self, email: &str) -> Result<OtpIssued> {
        let data: Option<OtpIssued> = self.post("/otp/generate", &OtpRequest { email }).await?;
        Ok(data.unwrap_or_default())
    }

    async fn resend_otp(&self, email: &str) -> Result<OtpIssued> {
        let data: Option<OtpIssued> = self.post("/otp/resend", &OtpRequest { email }).await?;
        Ok(data.unwrap_or_default())
    }

    async fn verify_register(
        &self,
        registration: &RegistrationRequest,
        otp_code: &str,
    ) -> Result<AuthData> {
        let path = "/otp/verify-register";
        let body = VerifyRegisterBody {
            registration,
            otp_code,
        };
        required(path, self.post(path, &body).await?)
    }

    async fn forgot_password(&self, email: &str) -> Result<()> {
        self.post::<_, serde_json::Value>("/forgot-password", &OtpRequest { email })
            .await?;
        Ok(())
    }

    async fn verify_reset_otp(&self, email: &str, otp_code: &str) -> Result<()> {
        self.post::<_, serde_json::Value>(
            "/verify-reset-otp",
            &VerifyResetOtpRequest { email, otp_code },
        )
        .await?;
        Ok(())
    }

    async fn reset_password(
        &self,
        email: &str,
        otp_code: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<()> {
        let body = ResetPasswordBody {
            email,
            otp_code,
            password,
            password_confirmation,
        };
        self.post::<_, serde_json::Value>("/reset-password", &body)
            .await?;
        Ok(())
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<AuthData> {
        let path = "/login";
        required(path, self.post(path, credentials).await?)
    }

    async fn list_participants(&self) -> Result<Vec<Participant>> {
        let data: Option<Vec<Participant>> = self.get("/daftar-hadir").await?;
        Ok(data.unwrap_or_default())
    }
}
