use actix_web::{delete, web, Responder};
use serde::Deserialize;
use tracing::info;

use super::errors::{parse_category, save_error_response};
use crate::auth::adapter::incoming::web::extractors::AdminSession;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RecordPath {
    pub category: String,
    pub id: String,
}

#[delete("/api/admin/{category}/{id}")]
pub async fn delete_record_handler(
    _admin: AdminSession,
    path: web::Path<RecordPath>,
    data: web::Data<AppState>,
) -> impl Responder {
    let path = path.into_inner();
    let category = match parse_category(&path.category) {
        Ok(category) => category,
        Err(resp) => return resp,
    };

    match data.site.delete_record(category, &path.id).await {
        Ok(()) => {
            info!(%category, id = %path.id, "Record deleted");
            ApiResponse::no_content()
        }
        Err(e) => save_error_response(&e),
    }
}
