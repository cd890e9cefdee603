use actix_web::{post, web, Responder};

use super::errors::{parse_category, save_error_response};
use crate::auth::adapter::incoming::web::extractors::AdminSession;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Add a default-populated record to the working copy. Saving is a separate PUT.
#[post("/api/admin/{category}/new")]
pub async fn new_record_handler(
    _admin: AdminSession,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let category = match parse_category(&path.into_inner()) {
        Ok(category) => category,
        Err(resp) => return resp,
    };

    match data.site.add_new(category).await {
        Ok(record) => ApiResponse::created(record),
        Err(e) => save_error_response(&e),
    }
}
