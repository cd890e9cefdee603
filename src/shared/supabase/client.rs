use std::sync::Arc;

use chrono::Utc;
use reqwest::{Client, RequestBuilder, Url};
use tokio::sync::RwLock;

use crate::auth::domain::entities::Session;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SupabaseClientError {
    #[error("Invalid Supabase URL: {0}")]
    InvalidUrl(String),
}

/// Shared connection to one Supabase project.
///
/// Cloning is cheap; clones share the HTTP pool and the signed-in session,
/// so the REST store sends the admin's token once the auth adapter signs in.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    anon_key: String,
    session: Arc<RwLock<Option<Session>>>,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: impl Into<String>) -> Result<Self, SupabaseClientError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url =
            Url::parse(&normalized).map_err(|e| SupabaseClientError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            http: Client::new(),
            base_url,
            anon_key: anon_key.into(),
            session: Arc::new(RwLock::new(None)),
        })
    }

    /// Absolute URL for a path relative to the project root, e.g. `rest/v1/posts`.
    pub fn endpoint(&self, path: &str) -> Result<Url, SupabaseClientError> {
        self.base_url
            .join(path)
            .map_err(|e| SupabaseClientError::InvalidUrl(e.to_string()))
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn set_session(&self, session: Option<Session>) {
        *self.session.write().await = session;
    }

    /// Access token of a live session, else the anon key.
    pub async fn bearer_token(&self) -> String {
        match self.session.read().await.as_ref() {
            Some(s) if !s.is_expired(Utc::now()) => s.access_token.clone(),
            _ => self.anon_key.clone(),
        }
    }

    /// Request carrying the `apikey` and `Authorization` headers.
    pub async fn request(&self, method: reqwest::Method, url: Url) -> RequestBuilder {
        let token = self.bearer_token().await;
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }
}
