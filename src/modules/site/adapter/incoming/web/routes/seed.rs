use actix_web::{post, web, Responder};
use tracing::error;

use super::errors::save_error_response;
use crate::auth::adapter::incoming::web::extractors::AdminSession;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Reset the remote store to the built-in template content.
#[post("/api/admin/seed")]
pub async fn seed_handler(_admin: AdminSession, data: web::Data<AppState>) -> impl Responder {
    match data.site.seed_defaults().await {
        Ok(()) => ApiResponse::success(data.site.snapshot().await),
        Err(e) => {
            error!(error = %e, "Seeding failed");
            save_error_response(&e)
        }
    }
}
