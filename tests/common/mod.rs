use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use serde_json::Value;
use tower::ServiceExt;

use ticket_console::build_router;
use ticket_console::errors::{AppError, Result};
use ticket_console::models::api::OtpIssued;
use ticket_console::models::participant::Participant;
use ticket_console::models::user::{AuthData, LoginRequest, RegistrationRequest, User};
use ticket_console::services::api_client::TicketingApi;
use ticket_console::services::event_store::EventStore;
use ticket_console::services::session::SessionStore;
use ticket_console::state::AppState;

pub const GOOD_CODE: &str = "123456";
pub const TAKEN_EMAIL: &str = "taken@example.com";

/// In-memory stand-in for the ticketing backend.
#[derive(Default)]
pub struct FakeBackend {
    pub participants: Vec<Participant>,
    pub calls: AtomicUsize,
}

impl FakeBackend {
    pub fn with_participants(participants: Vec<Participant>) -> Self {
        FakeBackend {
            participants,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn check_code(&self, code: &str) -> Result<()> {
        if code == GOOD_CODE {
            Ok(())
        } else {
            Err(AppError::backend(422, Some("Kode OTP tidak valid".to_string())))
        }
    }
}

#[async_trait]
impl TicketingApi for FakeBackend {
    async fn generate_otp(&self, email: &str) -> Result<OtpIssued> {
        self.hit();
        if email == TAKEN_EMAIL {
            return Err(AppError::backend(409, Some("Email sudah terdaftar".to_string())));
        }
        Ok(OtpIssued::default())
    }

    async fn resend_otp(&self, _email: &str) -> Result<OtpIssued> {
        self.hit();
        Ok(OtpIssued::default())
    }

    async fn verify_register(
        &self,
        registration: &RegistrationRequest,
        otp_code: &str,
    ) -> Result<AuthData> {
        self.hit();
        self.check_code(otp_code)?;
        Ok(AuthData {
            token: "registered-token".to_string(),
            user: User {
                id: "42".to_string(),
                name: registration.name.clone(),
                email: registration.email.clone(),
                role: Some("user".to_string()),
            },
        })
    }

    async fn forgot_password(&self, _email: &str) -> Result<()> {
        self.hit();
        Ok(())
    }

    async fn verify_reset_otp(&self, _email: &str, otp_code: &str) -> Result<()> {
        self.hit();
        self.check_code(otp_code)
    }

    async fn reset_password(
        &self,
        _email: &str,
        otp_code: &str,
        _password: &str,
        _confirmation: &str,
    ) -> Result<()> {
        self.hit();
        self.check_code(otp_code)
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<AuthData> {
        self.hit();
        if credentials.password != "admin12345" {
            return Err(AppError::backend(401, Some("Email atau password salah".to_string())));
        }
        Ok(AuthData {
            token: "admin-token".to_string(),
            user: User {
                id: "1".to_string(),
                name: "Admin".to_string(),
                email: credentials.email.clone(),
                role: Some("admin".to_string()),
            },
        })
    }

    async fn list_participants(&self) -> Result<Vec<Participant>> {
        self.hit();
        Ok(self.participants.clone())
    }
}

pub struct TestApp {
    pub router: Router,
    pub backend: Arc<FakeBackend>,
    pub session: SessionStore,
}

impl TestApp {
    pub fn new(backend: FakeBackend) -> Self {
        Self::with_events(backend, EventStore::new())
    }

    pub fn with_events(backend: FakeBackend, events: EventStore) -> Self {
        let backend = Arc::new(backend);
        let session = SessionStore::new();
        let state = AppState::with_api(backend.clone(), session.clone()).with_events(events);
        TestApp {
            router: build_router(state),
            backend,
            session,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (u16, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn send_raw(&self, uri: &str) -> (u16, String, String) {
        let response = self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }
}
