use actix_web::{put, web, Responder};
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use super::errors::{parse_category, save_error_response};
use crate::auth::adapter::incoming::web::extractors::AdminSession;
use crate::content::domain::entities::ContentRecord;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Upsert one record. The body is the record itself, `id` included.
#[put("/api/admin/{category}")]
pub async fn save_record_handler(
    _admin: AdminSession,
    path: web::Path<String>,
    body: web::Json<JsonValue>,
    data: web::Data<AppState>,
) -> impl Responder {
    let category = match parse_category(&path.into_inner()) {
        Ok(category) => category,
        Err(resp) => return resp,
    };

    let record = match ContentRecord::from_value(category, body.into_inner()) {
        Ok(record) => record,
        Err(e) => {
            warn!(%category, error = %e, "Rejected malformed record");
            return ApiResponse::bad_request("INVALID_RECORD", &e.to_string());
        }
    };

    match data.site.save_data(record).await {
        Ok(saved) => {
            if !category.is_singleton() {
                data.site.update_record(saved.clone()).await;
            }
            info!(%category, id = saved.id(), "Record saved");
            ApiResponse::success(saved)
        }
        Err(e) => save_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::json;

    use crate::content::domain::entities::{ContentCategory, PROFILE_ID};
    use crate::tests::support::app_state_builder::TestAppStateBuilder;

    #[actix_web::test]
    async fn saves_project_and_updates_working_copy() {
        let builder = TestAppStateBuilder::default().signed_in();
        let backends = builder.backends();
        let state = builder.build().await;
        let app =
            test::init_service(App::new().app_data(state.clone()).service(save_record_handler))
                .await;

        let req = test::TestRequest::put()
            .uri("/api/admin/projects")
            .set_json(json!({ "id": "p1", "name": "X", "link": "https://x.dev" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        assert_eq!(backends.remote.rows(ContentCategory::Projects).await.len(), 1);
        assert_eq!(state.site.projects().await[0].name, "X");
        assert!(state.site.cache().cached_entry().await.is_none());
    }

    #[actix_web::test]
    async fn saves_profile_under_table_name() {
        let state = TestAppStateBuilder::default().signed_in().build().await;
        let app =
            test::init_service(App::new().app_data(state.clone()).service(save_record_handler))
                .await;

        let req = test::TestRequest::put()
            .uri("/api/admin/site_config")
            .set_json(json!({ "id": PROFILE_ID, "name": "New Name", "bio_title": "Hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        assert_eq!(state.site.profile().await.name, "New Name");
    }

    #[actix_web::test]
    async fn profile_with_foreign_id_lands_on_singleton_row() {
        let builder = TestAppStateBuilder::default().signed_in();
        let backends = builder.backends();
        let state = builder.build().await;
        let app =
            test::init_service(App::new().app_data(state.clone()).service(save_record_handler))
                .await;

        let req = test::TestRequest::put()
            .uri("/api/admin/site_config")
            .set_json(json!({ "id": "second-profile", "name": "Renamed" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["id"], PROFILE_ID);
        let rows = backends.remote.rows(ContentCategory::Profile).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], PROFILE_ID);
        assert_eq!(state.site.cache().get_all_data(false).await.profile.name, "Renamed");
    }

    #[actix_web::test]
    async fn malformed_record_is_bad_request() {
        let state = TestAppStateBuilder::default().signed_in().build().await;
        let app = test::init_service(App::new().app_data(state).service(save_record_handler)).await;

        let req = test::TestRequest::put()
            .uri("/api/admin/media")
            .set_json(json!({ "id": "m1", "title": "T", "type": "hologram" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_RECORD");
    }

    #[actix_web::test]
    async fn unknown_category_is_bad_request() {
        let state = TestAppStateBuilder::default().signed_in().build().await;
        let app = test::init_service(App::new().app_data(state).service(save_record_handler)).await;

        let req = test::TestRequest::put()
            .uri("/api/admin/widgets")
            .set_json(json!({ "id": "w1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn remote_rejection_is_bad_gateway() {
        let builder = TestAppStateBuilder::default().signed_in();
        let backends = builder.backends();
        let state = builder.build().await;
        backends.remote.set_rejecting_writes(true);
        let app = test::init_service(App::new().app_data(state).service(save_record_handler)).await;

        let req = test::TestRequest::put()
            .uri("/api/admin/projects")
            .set_json(json!({ "id": "p1", "name": "X" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 502);
    }

    #[actix_web::test]
    async fn anonymous_cannot_save() {
        let builder = TestAppStateBuilder::default();
        let backends = builder.backends();
        let state = builder.build().await;
        let app = test::init_service(App::new().app_data(state).service(save_record_handler)).await;

        let req = test::TestRequest::put()
            .uri("/api/admin/projects")
            .set_json(json!({ "id": "p1", "name": "X" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
        assert!(backends.remote.rows(ContentCategory::Projects).await.is_empty());
    }
}
