use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    content: &'static str,
}

/// LIVENESS PROBE
/// - No I/O
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// READINESS PROBE
/// - Not ready until the initial content load has finished
#[get("/ready")]
pub async fn readiness(data: web::Data<AppState>) -> impl Responder {
    if data.site.is_loading() {
        HttpResponse::ServiceUnavailable().json(ReadinessResponse {
            status: "unhealthy",
            content: "loading",
        })
    } else {
        HttpResponse::Ok().json(ReadinessResponse {
            status: "ok",
            content: "loaded",
        })
    }
}
