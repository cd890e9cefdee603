mod get_categories;
mod get_content;
mod get_posts;

pub use get_categories::{get_categories_handler, get_category_posts_handler};
pub use get_content::get_content_handler;
pub use get_posts::{get_post_handler, get_posts_handler, PostSummary};
