pub mod api;
pub mod supabase;
