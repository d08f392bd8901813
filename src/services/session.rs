use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::user::{AuthData, User};

/// Logged-in admin session, shared by the HTTP client and the handlers.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<AuthData>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self, auth: AuthData) {
        tracing::info!("Session opened for {}", auth.user.email);
        *self.inner.write().await = Some(auth);
    }

    pub async fn close(&self) -> bool {
        let previous = self.inner.write().await.take();
        if let Some(auth) = &previous {
            tracing::info!("Session closed for {}", auth.user.email);
        }
        previous.is_some()
    }

    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|a| a.token.clone())
    }

    pub async fn user(&self) -> Option<User> {
        self.inner.read().await.as_ref().map(|a| a.user.clone())
    }
}
