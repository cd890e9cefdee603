pub mod admin;

pub use admin::AdminSession;
