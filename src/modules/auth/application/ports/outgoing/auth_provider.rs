use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::auth::domain::entities::{AuthEvent, Credentials, Session};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Enter your email first to receive a reset link.")]
    MissingEmail,

    #[error("Auth service unreachable: {0}")]
    Network(String),

    #[error("Auth service error: {0}")]
    Provider(String),
}

/// Port to the hosted authentication service.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The current session, if one exists and has not expired.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError>;

    /// Session-change notifications from this point on.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}
