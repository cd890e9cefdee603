use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::auth::application::ports::outgoing::auth_provider::{AuthError, AuthProvider};
use crate::auth::domain::entities::{AuthEvent, Credentials, Session};
use crate::shared::supabase::SupabaseClient;

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
    #[serde(default)]
    user: Option<TokenUser>,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    #[serde(default)]
    email: Option<String>,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user_email: self.user.and_then(|u| u.email),
            expires_at: Utc::now() + Duration::seconds(self.expires_in),
        }
    }
}

/// GoTrue (`/auth/v1`) implementation of the auth provider.
///
/// The session lives in the shared [`SupabaseClient`], so REST calls made
/// after sign-in carry the user's token.
pub struct SupabaseAuth {
    client: SupabaseClient,
    events: broadcast::Sender<AuthEvent>,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { client, events }
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, AuthError> {
        self.client
            .endpoint(path)
            .map_err(|e| AuthError::Provider(e.to_string()))
    }

    fn notify(&self, event: AuthEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

fn network(e: reqwest::Error) -> AuthError {
    AuthError::Network(e.to_string())
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        match self.client.session().await {
            Some(session) if session.is_expired(Utc::now()) => {
                info!("Stored session expired");
                self.client.set_session(None).await;
                self.notify(AuthEvent::SignedOut);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .client
            .request(Method::POST, url)
            .await
            .json(&serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await
            .map_err(network)?;

        match response.status() {
            status if status.is_success() => {
                let token = response
                    .json::<TokenResponse>()
                    .await
                    .map_err(|e| AuthError::Provider(e.to_string()))?;
                let session = token.into_session();
                self.client.set_session(Some(session.clone())).await;
                self.notify(AuthEvent::SignedIn(session.clone()));
                info!("Signed in as {:?}", session.user_email);
                Ok(session)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                Err(AuthError::InvalidCredentials)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AuthError::Provider(format!("{status}: {body}")))
            }
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let url = self.endpoint("auth/v1/logout")?;
        let result = self.client.request(Method::POST, url).await.send().await;

        // The local session is dropped even if the remote call fails.
        self.client.set_session(None).await;
        self.notify(AuthEvent::SignedOut);

        match result {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => {
                warn!("Remote sign-out returned {}", response.status());
                Err(AuthError::Provider(response.status().to_string()))
            }
            Err(e) => Err(network(e)),
        }
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let url = self.endpoint("auth/v1/recover")?;
        let response = self
            .client
            .request(Method::POST, url)
            .await
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(network)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AuthError::Provider(response.status().to_string()))
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
