//! PostgreSQL repository implementations

pub mod user_repo_impl;
pub mod tenant_repo_impl;

pub use user_repo_impl::PgUserRepository;
pub use tenant_repo_impl::PgTenantRepository;
