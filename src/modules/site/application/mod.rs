pub mod site_context;
