use actix_web::{post, web, Responder};
use serde::Serialize;
use tracing::info;

use crate::auth::domain::entities::AuthState;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize)]
struct LogoutResponseBody {
    state: AuthState,
    message: &'static str,
}

/// Always succeeds; provider failures are logged by the site context.
#[post("/api/auth/logout")]
pub async fn logout_handler(data: web::Data<AppState>) -> impl Responder {
    data.site.logout().await;
    info!("Admin logged out");

    ApiResponse::success(LogoutResponseBody {
        state: data.site.auth_state(),
        message: "Logged out successfully",
    })
}
