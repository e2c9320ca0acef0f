//! Request payloads and their conversion into core inputs.
//!
//! Update payloads keep "absent" and "null" apart: absent fields are left
//! alone, `null` clears a nullable column, and `null` on a required column
//! fails deserialization (422).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use validator::Validate;

use tenantry_core::domain::{EmergencyContact, NewTenant, NewUser, TenantChanges, UserChanges};
use tenantry_shared::double_option;

/// For required columns in a partial update: absent is fine, `null` is not.
fn non_null<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(serde::de::Error::custom("field cannot be null")),
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    #[validate(length(min = 1))]
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        NewUser {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
            role: req.role,
            phone: req.phone,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(min = 1, max = 128))]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(min = 1))]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        UserChanges {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
            role: req.role,
            phone: req.phone,
        }
    }
}

// ---------------------------------------------------------------------------
// Tenants
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTenantRequest {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub government_id: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
}

impl From<CreateTenantRequest> for NewTenant {
    fn from(req: CreateTenantRequest) -> Self {
        NewTenant {
            full_name: req.full_name,
            email: req.email,
            phone: req.phone,
            date_of_birth: req.date_of_birth,
            government_id: req.government_id,
            emergency_contact: req.emergency_contact,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTenantRequest {
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(email)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub government_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub emergency_contact: Option<Option<EmergencyContact>>,
}

impl From<UpdateTenantRequest> for TenantChanges {
    fn from(req: UpdateTenantRequest) -> Self {
        TenantChanges {
            full_name: req.full_name,
            email: req.email,
            phone: req.phone,
            date_of_birth: req.date_of_birth,
            government_id: req.government_id,
            emergency_contact: req.emergency_contact,
        }
    }
}
