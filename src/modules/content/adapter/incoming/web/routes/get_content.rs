use actix_web::{get, web, Responder};

use crate::shared::api::ApiResponse;
use crate::AppState;

/// Everything the public site renders, served through the content cache.
#[get("/api/content")]
pub async fn get_content_handler(data: web::Data<AppState>) -> impl Responder {
    let read = data.site.cache().read(false).await;
    ApiResponse::content(read.bundle, read.origin.as_str())
}
