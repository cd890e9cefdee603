use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::auth::application::ports::outgoing::auth_provider::{AuthError, AuthProvider};
use crate::auth::domain::entities::{AuthEvent, Credentials, Session};

const EVENT_CAPACITY: usize = 16;

/// In-process auth provider with a fixed set of accounts.
pub struct InMemoryAuth {
    accounts: HashMap<String, String>,
    session: RwLock<Option<Session>>,
    events: broadcast::Sender<AuthEvent>,
    offline: AtomicBool,
    session_ttl: Duration,
    reset_requests: RwLock<Vec<String>>,
}

impl Default for InMemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuth {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            accounts: HashMap::new(),
            session: RwLock::new(None),
            events,
            offline: AtomicBool::new(false),
            session_ttl: Duration::hours(1),
            reset_requests: RwLock::new(Vec::new()),
        }
    }

    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        self.accounts.insert(email.to_string(), password.to_string());
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Terminate the session from the provider side, notifying subscribers.
    pub async fn terminate_session(&self) {
        *self.session.write().await = None;
        let _ = self.events.send(AuthEvent::SignedOut);
    }

    pub async fn reset_requests(&self) -> Vec<String> {
        self.reset_requests.read().await.clone()
    }

    fn ensure_online(&self) -> Result<(), AuthError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(AuthError::Network("auth service unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuth {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        self.ensure_online()?;
        let mut session = self.session.write().await;
        match session.as_ref() {
            Some(s) if s.is_expired(Utc::now()) => {
                *session = None;
                let _ = self.events.send(AuthEvent::SignedOut);
                Ok(None)
            }
            other => Ok(other.cloned()),
        }
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.ensure_online()?;
        match self.accounts.get(&credentials.email) {
            Some(password) if *password == credentials.password => {
                let session = Session {
                    access_token: Uuid::new_v4().to_string(),
                    refresh_token: Some(Uuid::new_v4().to_string()),
                    user_email: Some(credentials.email.clone()),
                    expires_at: Utc::now() + self.session_ttl,
                };
                *self.session.write().await = Some(session.clone());
                let _ = self.events.send(AuthEvent::SignedIn(session.clone()));
                Ok(session)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.ensure_online()?;
        self.terminate_session().await;
        Ok(())
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.ensure_online()?;
        self.reset_requests.write().await.push(email.to_string());
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
