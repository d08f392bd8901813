use serde::{Deserialize, Serialize};

use crate::errors::{AppError, Result};

/// Every issue or resend opens a window of this many seconds.
pub const OTP_WINDOW_SECONDS: u32 = 300;
pub const OTP_CODE_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPhase {
    Idle,
    Awaiting,
    Expired,
    Verified,
}

/// Countdown state of one OTP challenge.
///
/// `generation` changes whenever the challenge is restarted, abandoned or
/// finished, so a countdown started for an older challenge can tell it has
/// been superseded.
#[derive(Debug, Clone, Serialize)]
pub struct OtpChallenge {
    pub phase: OtpPhase,
    pub email: Option<String>,
    pub remaining_seconds: u32,
    pub window_seconds: u32,
    #[serde(skip)]
    generation: u64,
}

impl Default for OtpChallenge {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpChallenge {
    pub fn new() -> Self {
        OtpChallenge {
            phase: OtpPhase::Idle,
            email: None,
            remaining_seconds: 0,
            window_seconds: OTP_WINDOW_SECONDS,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// (Re)starts the window for `email`. Returns the new generation.
    pub fn start(&mut self, email: &str) -> u64 {
        self.generation += 1;
        self.phase = OtpPhase::Awaiting;
        self.email = Some(email.to_string());
        self.remaining_seconds = OTP_WINDOW_SECONDS;
        self.generation
    }

    /// One second elapsed. Returns whether the countdown should keep going.
    pub fn tick(&mut self) -> bool {
        if self.phase != OtpPhase::Awaiting {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = OtpPhase::Expired;
            return false;
        }
        true
    }

    pub fn abandon(&mut self) {
        self.generation += 1;
        self.phase = OtpPhase::Idle;
        self.email = None;
        self.remaining_seconds = 0;
    }

    pub fn mark_verified(&mut self) {
        self.generation += 1;
        self.phase = OtpPhase::Verified;
    }

    /// Local gate in front of verification; nothing here talks to the backend.
    pub fn check_code(&self, code: &str) -> Result<()> {
        if !is_valid_code(code) {
            return Err(AppError::InvalidOtpCode(format!(
                "OTP must be exactly {} digits",
                OTP_CODE_LENGTH
            )));
        }
        match self.phase {
            OtpPhase::Idle => Err(AppError::OtpStateConflict(
                "Request an OTP before verifying".to_string(),
            )),
            OtpPhase::Verified => Err(AppError::OtpStateConflict(
                "OTP has already been verified".to_string(),
            )),
            OtpPhase::Expired => Err(AppError::OtpExpired(
                "OTP has expired, please request a new one".to_string(),
            )),
            OtpPhase::Awaiting if self.remaining_seconds == 0 => Err(AppError::OtpExpired(
                "OTP has expired, please request a new one".to_string(),
            )),
            OtpPhase::Awaiting => Ok(()),
        }
    }
}

pub fn is_valid_code(code: &str) -> bool {
    code.len() == OTP_CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}
