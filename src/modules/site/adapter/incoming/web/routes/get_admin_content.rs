use actix_web::{get, web, Responder};
use serde::Serialize;

use crate::auth::adapter::incoming::web::extractors::AdminSession;
use crate::auth::domain::entities::AuthState;
use crate::content::domain::entities::ContentBundle;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize)]
struct AdminContentResponse {
    state: AuthState,
    is_loading: bool,
    content: ContentBundle,
}

/// The working copy held by the site context, including unsaved additions.
#[get("/api/admin/content")]
pub async fn get_admin_content_handler(
    _admin: AdminSession,
    data: web::Data<AppState>,
) -> impl Responder {
    ApiResponse::success(AdminContentResponse {
        state: data.site.auth_state(),
        is_loading: data.site.is_loading(),
        content: data.site.snapshot().await,
    })
}
