//! Application services

pub mod user_service;
pub mod tenant_service;

pub use user_service::UserService;
pub use tenant_service::TenantService;
