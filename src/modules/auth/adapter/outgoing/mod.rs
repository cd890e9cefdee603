pub mod memory_auth;
pub mod supabase_auth;
