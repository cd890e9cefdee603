// src/shared/api/response.rs
use actix_web::{http::StatusCode, HttpResponse, HttpResponseBuilder};
use serde::Serialize;

/// Reports which layer produced a content bundle: `cache`, `remote`,
/// `cached_fallback` or `defaults`.
pub const CONTENT_ORIGIN_HEADER: &str = "X-Content-Origin";

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Serialize, Clone)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(mut builder: HttpResponseBuilder, data: T) -> HttpResponse {
        builder.json(ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        })
    }

    pub fn success(data: T) -> HttpResponse {
        Self::ok(HttpResponse::Ok(), data)
    }

    pub fn created(data: T) -> HttpResponse {
        Self::ok(HttpResponse::Created(), data)
    }

    /// 200 with the content origin header set.
    pub fn content(data: T, origin: &str) -> HttpResponse {
        let mut builder = HttpResponse::Ok();
        builder.insert_header((CONTENT_ORIGIN_HEADER, origin.to_string()));
        Self::ok(builder, data)
    }
}

impl ApiResponse<()> {
    pub fn no_content() -> HttpResponse {
        HttpResponse::NoContent().finish()
    }

    pub fn error(status: StatusCode, code: &str, message: &str) -> HttpResponse {
        HttpResponse::build(status).json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        })
    }

    pub fn bad_request(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn unauthorized(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::UNAUTHORIZED, code, message)
    }

    pub fn not_found(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::NOT_FOUND, code, message)
    }

    pub fn payload_too_large(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::PAYLOAD_TOO_LARGE, code, message)
    }

    pub fn unsupported_media_type(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::UNSUPPORTED_MEDIA_TYPE, code, message)
    }

    /// The remote store or auth provider answered with an error.
    pub fn bad_gateway(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::BAD_GATEWAY, code, message)
    }

    /// The remote store or auth provider could not be reached.
    pub fn service_unavailable(code: &str, message: &str) -> HttpResponse {
        Self::error(StatusCode::SERVICE_UNAVAILABLE, code, message)
    }

    pub fn internal_error() -> HttpResponse {
        Self::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An unexpected error occurred",
        )
    }
}
