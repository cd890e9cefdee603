mod client;

pub use client::{SupabaseClient, SupabaseClientError};
