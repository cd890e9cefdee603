use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::future::{ready, Ready};

use crate::shared::api::ApiResponse;
use crate::site::application::site_context::AccessError;
use crate::AppState;

/// Proof that the request arrived while the site is in the authenticated state.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AdminSession {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state,
            None => return ready(Err(create_api_error(ApiResponse::internal_error()))),
        };

        match state.site.require_admin() {
            Ok(()) => ready(Ok(AdminSession)),
            Err(AccessError::NotAuthenticated) => ready(Err(create_api_error(
                ApiResponse::unauthorized("NOT_AUTHENTICATED", "Sign in to access the admin area"),
            ))),
        }
    }
}
