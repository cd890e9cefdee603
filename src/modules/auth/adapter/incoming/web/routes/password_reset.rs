use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};

use super::login::auth_error_response;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize)]
pub struct PasswordResetRequestDto {
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize)]
struct PasswordResetResponse {
    message: &'static str,
}

/// Same answer for known and unknown addresses.
#[post("/api/auth/password-reset")]
pub async fn password_reset_handler(
    req: web::Json<PasswordResetRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.site.request_password_reset(&req.email).await {
        Ok(()) => ApiResponse::success(PasswordResetResponse {
            message: "If that address has an account, a reset link is on its way.",
        }),
        Err(e) => auth_error_response(&e),
    }
}
