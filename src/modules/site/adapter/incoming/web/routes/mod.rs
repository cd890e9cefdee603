mod delete_record;
mod errors;
mod get_admin_content;
mod new_record;
mod preview;
mod refresh;
mod save_record;
mod seed;

pub use delete_record::delete_record_handler;
pub use get_admin_content::get_admin_content_handler;
pub use new_record::new_record_handler;
pub use preview::preview_handler;
pub use refresh::refresh_handler;
pub use save_record::save_record_handler;
pub use seed::seed_handler;
