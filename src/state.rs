use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::config::AppConfig;
use crate::models::otp::OtpPhase;
use crate::services::api_client::{HttpTicketingApi, TicketingApi};
use crate::services::event_store::EventStore;
use crate::services::otp_controller::OtpController;
use crate::services::session::SessionStore;

pub type SharedOtp = Arc<Mutex<OtpController>>;

/// Live OTP controllers of one flow, keyed by lowercased email.
#[derive(Clone, Default)]
pub struct OtpRegistry {
    controllers: Arc<Mutex<HashMap<String, SharedOtp>>>,
}

impl OtpRegistry {
    pub fn key(email: &str) -> String {
        email.trim().to_lowercase()
    }

    pub async fn get(&self, email: &str) -> Option<SharedOtp> {
        self.controllers.lock().await.get(&Self::key(email)).cloned()
    }

    /// Installs a controller, dropping (and so cancelling) any previous one.
    /// Controllers whose challenge has expired are evicted on the way.
    pub async fn insert(&self, email: &str, controller: OtpController) -> SharedOtp {
        let shared = Arc::new(Mutex::new(controller));
        let mut controllers = self.controllers.lock().await;
        Self::evict_expired(&mut controllers).await;
        controllers.insert(Self::key(email), shared.clone());
        shared
    }

    pub async fn len(&self) -> usize {
        self.controllers.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    // Controllers busy in a request are skipped; the next sweep gets them.
    async fn evict_expired(controllers: &mut HashMap<String, SharedOtp>) {
        let mut expired = Vec::new();
        for (key, shared) in controllers.iter() {
            if let Ok(controller) = shared.try_lock() {
                if controller.phase().await == OtpPhase::Expired {
                    expired.push(key.clone());
                }
            }
        }
        for key in expired {
            debug!("Evicting expired OTP controller for {}", key);
            controllers.remove(&key);
        }
    }

    pub async fn remove(&self, email: &str) -> Option<SharedOtp> {
        self.controllers.lock().await.remove(&Self::key(email))
    }
}

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn TicketingApi>,
    pub session: SessionStore,
    pub events: EventStore,
    pub registrations: OtpRegistry,
    pub password_resets: OtpRegistry,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let session = SessionStore::new();
        let api = Arc::new(HttpTicketingApi::new(config, session.clone()));
        Self::with_api(api, session)
    }

    pub fn with_api(api: Arc<dyn TicketingApi>, session: SessionStore) -> Self {
        AppState {
            api,
            session,
            events: EventStore::new(),
            registrations: OtpRegistry::default(),
            password_resets: OtpRegistry::default(),
        }
    }

    pub fn with_events(mut self, events: EventStore) -> Self {
        self.events = events;
        self
    }
}
