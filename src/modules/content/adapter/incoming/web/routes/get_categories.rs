use actix_web::{get, web, Responder};

use super::get_posts::PostSummary;
use crate::content::application::services::post_catalog::{categories, posts_in_category};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[get("/api/categories")]
pub async fn get_categories_handler(data: web::Data<AppState>) -> impl Responder {
    let read = data.site.cache().read(false).await;
    ApiResponse::content(categories(&read.bundle.posts), read.origin.as_str())
}

/// Posts tagged with the category. Unknown categories give an empty list.
#[get("/api/categories/{category}")]
pub async fn get_category_posts_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let category = path.into_inner();
    let read = data.site.cache().read(false).await;

    let posts: Vec<PostSummary> = posts_in_category(&read.bundle.posts, &category)
        .into_iter()
        .map(PostSummary::from)
        .collect();
    ApiResponse::content(posts, read.origin.as_str())
}
