pub mod comrak_renderer;
pub mod file_storage;
pub mod memory_storage;
pub mod memory_store;
pub mod redis_storage;
pub mod supabase_rest_store;
