//! # Tenantry Security
//! 
//! Credential hashing for secrets persisted by the core.

pub mod password;

pub use password::{PasswordError, PasswordService};
