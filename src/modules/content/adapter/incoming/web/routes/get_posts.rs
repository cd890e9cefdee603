use actix_web::{get, web, Responder};
use serde::Serialize;

use crate::content::application::services::markdown::render_document;
use crate::content::application::services::post_catalog::find_post;
use crate::content::domain::entities::Post;
use crate::content::domain::slug::resolve_slug;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// A post without its body, addressed by its resolved slug.
#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub date: String,
    pub duration: String,
    pub categories: Vec<String>,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            slug: resolve_slug(post),
            title: post.title.clone(),
            date: post.date.clone(),
            duration: post.duration.clone(),
            categories: post.categories.clone(),
        }
    }
}

#[derive(Serialize)]
struct PostDetail {
    post: Post,
    slug: String,
    html: String,
}

#[get("/api/posts")]
pub async fn get_posts_handler(data: web::Data<AppState>) -> impl Responder {
    let read = data.site.cache().read(false).await;
    let posts: Vec<PostSummary> = read.bundle.posts.iter().map(PostSummary::from).collect();
    ApiResponse::content(posts, read.origin.as_str())
}

/// A post by resolved slug (or id), with its body rendered to HTML.
#[get("/api/posts/{slug}")]
pub async fn get_post_handler(path: web::Path<String>, data: web::Data<AppState>) -> impl Responder {
    let key = path.into_inner();
    let read = data.site.cache().read(false).await;

    let Some(post) = find_post(&read.bundle.posts, &key) else {
        return ApiResponse::not_found("POST_NOT_FOUND", "Post not found");
    };

    let html = render_document(data.renderer.as_ref(), post.content.as_deref());
    ApiResponse::content(
        PostDetail {
            slug: resolve_slug(post),
            post: post.clone(),
            html,
        },
        read.origin.as_str(),
    )
}
