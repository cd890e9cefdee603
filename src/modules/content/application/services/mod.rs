pub mod content_cache;
pub mod markdown;
pub mod post_catalog;
