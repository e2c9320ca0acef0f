//! # Tenantry Core - Domain Module
//! 
//! Domain entities for users and tenants.

pub mod user;
pub mod tenant;

pub use user::{NewUser, User, UserChanges, UserRecord, UserUpdate};
pub use tenant::{EmergencyContact, NewTenant, Tenant, TenantChanges};
