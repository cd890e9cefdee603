// src/shared/api/json_config.rs
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::web::JsonConfig;
use actix_web::HttpResponse;

use crate::shared::api::ApiResponse;

/// Largest accepted JSON body. Post bodies travel inline, so this sits above
/// the markdown renderer's own input cap.
pub const MAX_JSON_BODY_BYTES: usize = 2 * 1024 * 1024;

fn payload_error_response(err: &JsonPayloadError) -> HttpResponse {
    match err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            ApiResponse::payload_too_large("BODY_TOO_LARGE", &err.to_string())
        }
        JsonPayloadError::ContentType => ApiResponse::unsupported_media_type(
            "UNSUPPORTED_MEDIA_TYPE",
            "Expected an application/json body",
        ),
        _ => ApiResponse::bad_request("INVALID_BODY", &err.to_string()),
    }
}

pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(MAX_JSON_BODY_BYTES)
        .error_handler(|err, _req| {
            let resp = payload_error_response(&err);
            InternalError::from_response(err, resp).into()
        })
}
