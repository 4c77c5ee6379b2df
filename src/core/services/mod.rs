pub mod auth_service;
pub mod record_service;
pub mod schema_service;
pub mod types;
