use actix_web::{post, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::auth::application::ports::outgoing::AuthError;
use crate::auth::domain::entities::{AuthState, Credentials};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequestDto {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    state: AuthState,
    user_email: Option<String>,
    expires_at: DateTime<Utc>,
}

pub(crate) fn auth_error_response(err: &AuthError) -> HttpResponse {
    match err {
        AuthError::InvalidCredentials => {
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }
        AuthError::SessionExpired => {
            ApiResponse::unauthorized("SESSION_EXPIRED", "Session expired, sign in again")
        }
        AuthError::MissingEmail => ApiResponse::bad_request("MISSING_EMAIL", &err.to_string()),
        AuthError::Network(e) => {
            error!(error = %e, "Auth service unreachable");
            ApiResponse::service_unavailable("AUTH_UNAVAILABLE", "Auth service unreachable")
        }
        AuthError::Provider(e) => {
            error!(error = %e, "Auth service error");
            ApiResponse::bad_gateway("AUTH_PROVIDER_ERROR", "Auth service error")
        }
    }
}

#[post("/api/auth/login")]
pub async fn login_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();
    let credentials = Credentials::new(dto.email, dto.password);

    if credentials.email.is_empty() || credentials.password.is_empty() {
        return ApiResponse::bad_request("MISSING_CREDENTIALS", "Email and password are required");
    }

    info!(email = %credentials.email, "Admin login attempt");

    match data.site.sign_in(&credentials).await {
        Ok(session) => ApiResponse::success(LoginResponse {
            state: data.site.auth_state(),
            user_email: session.user_email,
            expires_at: session.expires_at,
        }),
        Err(e) => {
            warn!(error = %e, "Admin login failed");
            auth_error_response(&e)
        }
    }
}
