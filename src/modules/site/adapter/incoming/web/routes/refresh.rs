use actix_web::{post, web, Responder};

use crate::auth::adapter::incoming::web::extractors::AdminSession;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Reload the working copy from the remote store, bypassing the cache.
#[post("/api/admin/refresh")]
pub async fn refresh_handler(_admin: AdminSession, data: web::Data<AppState>) -> impl Responder {
    data.site.refresh_data().await;
    ApiResponse::success(data.site.snapshot().await)
}
