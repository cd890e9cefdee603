use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};

use crate::auth::adapter::incoming::web::extractors::AdminSession;
use crate::content::application::services::markdown::render_document;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize)]
pub struct PreviewRequestDto {
    #[serde(default)]
    pub markdown: Option<String>,
}

#[derive(Serialize)]
struct PreviewResponse {
    html: String,
}

#[post("/api/admin/preview")]
pub async fn preview_handler(
    _admin: AdminSession,
    req: web::Json<PreviewRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let html = render_document(data.renderer.as_ref(), req.markdown.as_deref());
    ApiResponse::success(PreviewResponse { html })
}
