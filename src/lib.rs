pub mod config;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::auth;
pub use modules::content;
pub use modules::site;

use std::sync::Arc;

use actix_web::web;

use crate::content::application::ports::outgoing::markdown_renderer::MarkdownRenderer;
use crate::shared::api::custom_json_config;
use crate::site::application::site_context::SiteContext;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteContext>,
    pub renderer: Arc<dyn MarkdownRenderer + Send + Sync>,
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(custom_json_config());
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Content
    cfg.service(crate::content::adapter::incoming::web::routes::get_content_handler);
    cfg.service(crate::content::adapter::incoming::web::routes::get_posts_handler);
    cfg.service(crate::content::adapter::incoming::web::routes::get_post_handler);
    cfg.service(crate::content::adapter::incoming::web::routes::get_categories_handler);
    cfg.service(crate::content::adapter::incoming::web::routes::get_category_posts_handler);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::login_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::logout_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::password_reset_handler);
    // Admin
    cfg.service(crate::site::adapter::incoming::web::routes::get_admin_content_handler);
    cfg.service(crate::site::adapter::incoming::web::routes::refresh_handler);
    cfg.service(crate::site::adapter::incoming::web::routes::seed_handler);
    cfg.service(crate::site::adapter::incoming::web::routes::preview_handler);
    cfg.service(crate::site::adapter::incoming::web::routes::new_record_handler);
    cfg.service(crate::site::adapter::incoming::web::routes::save_record_handler);
    cfg.service(crate::site::adapter::incoming::web::routes::delete_record_handler);
}
