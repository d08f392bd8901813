// services/otp_controller.rs
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant};
use tracing::{debug, info, warn};
use validator::{Validate, ValidateEmail};

use crate::errors::{AppError, Result};
use crate::models::otp::{OtpChallenge, OtpPhase};
use crate::models::user::{AuthData, PasswordResetRequest, RegistrationRequest};
use crate::services::api_client::TicketingApi;

const TICK: Duration = Duration::from_secs(1);

/// Which backend flow the OTP guards.
#[derive(Debug, Clone)]
pub enum OtpFlow {
    Registration(RegistrationRequest),
    PasswordReset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VerifyOutcome {
    Registered(AuthData),
    ResetAuthorized,
}

/// Drives one OTP challenge: issues and resends through the backend, runs
/// the one-second countdown and gates verification locally.
pub struct OtpController {
    api: Arc<dyn TicketingApi>,
    flow: OtpFlow,
    challenge: Arc<Mutex<OtpChallenge>>,
    countdown: Option<JoinHandle<()>>,
    verified_code: Option<String>,
}

impl OtpController {
    pub fn new(api: Arc<dyn TicketingApi>, flow: OtpFlow) -> Self {
        OtpController {
            api,
            flow,
            challenge: Arc::new(Mutex::new(OtpChallenge::new())),
            countdown: None,
            verified_code: None,
        }
    }

    pub fn for_registration(api: Arc<dyn TicketingApi>, registration: RegistrationRequest) -> Self {
        Self::new(api, OtpFlow::Registration(registration))
    }

    pub fn for_password_reset(api: Arc<dyn TicketingApi>) -> Self {
        Self::new(api, OtpFlow::PasswordReset)
    }

    pub async fn status(&self) -> OtpChallenge {
        self.challenge.lock().await.clone()
    }

    pub async fn phase(&self) -> OtpPhase {
        self.challenge.lock().await.phase
    }

    pub async fn remaining_seconds(&self) -> u32 {
        self.challenge.lock().await.remaining_seconds
    }

    /// Code accepted by the backend, kept for finishing a password reset.
    pub fn verified_code(&self) -> Option<&str> {
        self.verified_code.as_deref()
    }

    pub async fn issue(&mut self, email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::invalid_data("Email is required"));
        }
        if !email.validate_email() {
            return Err(AppError::invalid_data("Please enter a valid email address"));
        }
        self.ensure_not_verified().await?;

        match &self.flow {
            OtpFlow::Registration(_) => {
                self.api.generate_otp(email).await?;
            }
            OtpFlow::PasswordReset => self.api.forgot_password(email).await?,
        }
        if let OtpFlow::Registration(registration) = &mut self.flow {
            registration.email = email.to_string();
        }

        info!("OTP issued for {}", email);
        self.restart(email).await;
        Ok(())
    }

    pub async fn resend(&mut self) -> Result<()> {
        self.ensure_not_verified().await?;
        let email = self
            .challenge
            .lock()
            .await
            .email
            .clone()
            .ok_or_else(|| AppError::OtpStateConflict("Request an OTP first".to_string()))?;

        match &self.flow {
            OtpFlow::Registration(_) => {
                self.api.resend_otp(&email).await?;
            }
            OtpFlow::PasswordReset => self.api.forgot_password(&email).await?,
        }

        info!("OTP resent for {}", email);
        self.restart(&email).await;
        Ok(())
    }

    pub async fn verify(&mut self, code: &str) -> Result<VerifyOutcome> {
        let code = code.trim();
        let email = {
            let challenge = self.challenge.lock().await;
            challenge.check_code(code)?;
            challenge.email.clone().unwrap_or_default()
        };

        let outcome = match &self.flow {
            OtpFlow::Registration(registration) => {
                let auth = self.api.verify_register(registration, code).await.map_err(|e| {
                    warn!("Registration OTP rejected for {}: {}", email, e);
                    e
                })?;
                VerifyOutcome::Registered(auth)
            }
            OtpFlow::PasswordReset => {
                self.api.verify_reset_otp(&email, code).await.map_err(|e| {
                    warn!("Reset OTP rejected for {}: {}", email, e);
                    e
                })?;
                VerifyOutcome::ResetAuthorized
            }
        };

        self.stop_countdown();
        self.challenge.lock().await.mark_verified();
        self.verified_code = Some(code.to_string());
        info!("OTP verified for {}", email);
        Ok(outcome)
    }

    /// Finishes a password reset with the code verified earlier.
    pub async fn complete_reset(&mut self, reset: &PasswordResetRequest) -> Result<()> {
        if !matches!(self.flow, OtpFlow::PasswordReset) {
            return Err(AppError::OtpStateConflict(
                "Not a password reset flow".to_string(),
            ));
        }
        reset.validate()?;

        let code = self.verified_code.clone().ok_or_else(|| {
            AppError::OtpStateConflict("Verify the OTP before resetting the password".to_string())
        })?;
        let email = self.challenge.lock().await.email.clone().unwrap_or_default();

        self.api
            .reset_password(&email, &code, &reset.password, &reset.password_confirmation)
            .await?;

        info!("Password reset for {}", email);
        self.abandon().await;
        Ok(())
    }

    /// User went back to edit the email; drop the challenge.
    pub async fn abandon(&mut self) {
        self.stop_countdown();
        self.challenge.lock().await.abandon();
        self.verified_code = None;
    }

    async fn ensure_not_verified(&self) -> Result<()> {
        if self.challenge.lock().await.phase == OtpPhase::Verified {
            return Err(AppError::OtpStateConflict(
                "OTP has already been verified".to_string(),
            ));
        }
        Ok(())
    }

    async fn restart(&mut self, email: &str) {
        self.stop_countdown();
        let generation = self.challenge.lock().await.start(email);
        self.countdown = Some(spawn_countdown(self.challenge.clone(), generation));
    }

    fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
    }
}

impl Drop for OtpController {
    fn drop(&mut self) {
        self.stop_countdown();
    }
}

fn spawn_countdown(challenge: Arc<Mutex<OtpChallenge>>, generation: u64) -> JoinHandle<()> {
    // schedule from the moment the challenge starts, not from the first poll
    let first = Instant::now() + TICK;
    tokio::spawn(async move {
        let mut interval = time::interval_at(first, TICK);
        loop {
            interval.tick().await;
            let mut challenge = challenge.lock().await;
            if challenge.generation() != generation {
                debug!("Countdown {} superseded", generation);
                break;
            }
            if !challenge.tick() {
                info!("OTP for {:?} expired", challenge.email);
                break;
            }
            debug!("Countdown {}: {}s left", generation, challenge.remaining_seconds);
        }
    })
}
