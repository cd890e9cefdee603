pub mod app_state_builder;
pub mod clock;
pub mod fixtures;
