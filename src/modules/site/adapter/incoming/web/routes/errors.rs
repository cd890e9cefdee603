use std::str::FromStr;

use actix_web::HttpResponse;
use tracing::error;

use crate::content::domain::entities::ContentCategory;
use crate::content::application::ports::outgoing::RemoteStoreError;
use crate::shared::api::ApiResponse;
use crate::site::application::site_context::SaveError;

pub(super) fn parse_category(raw: &str) -> Result<ContentCategory, HttpResponse> {
    ContentCategory::from_str(raw)
        .map_err(|e| ApiResponse::bad_request("UNKNOWN_CATEGORY", &e.to_string()))
}

pub(super) fn save_error_response(err: &SaveError) -> HttpResponse {
    match err {
        SaveError::SingletonCategory(_) => {
            ApiResponse::bad_request("SINGLETON_CATEGORY", &err.to_string())
        }
        SaveError::Serialization(msg) => {
            error!("Record serialization failed: {}", msg);
            ApiResponse::internal_error()
        }
        SaveError::Remote(RemoteStoreError::Network(_)) => {
            ApiResponse::service_unavailable("REMOTE_UNAVAILABLE", "Content backend unreachable")
        }
        SaveError::Remote(RemoteStoreError::Rejected { status, message }) => {
            ApiResponse::bad_gateway("REMOTE_REJECTED", &format!("{status}: {message}"))
        }
        SaveError::Remote(RemoteStoreError::Malformed(_)) => {
            ApiResponse::bad_gateway("REMOTE_MALFORMED", "Unexpected response from content backend")
        }
    }
}
