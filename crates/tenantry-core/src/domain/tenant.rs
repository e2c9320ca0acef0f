//! Tenant domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured emergency contact, e.g. `{"name": "Bob", "phone": "5559998888"}`.
/// Persisted as serialized JSON text.
pub type EmergencyContact = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub government_id: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewTenant {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub government_id: Option<String>,
    pub emergency_contact: Option<EmergencyContact>,
}

/// Partial update. Outer `None` leaves a column untouched; for the nullable
/// columns `Some(None)` writes NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TenantChanges {
    pub full_name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub government_id: Option<Option<String>>,
    pub emergency_contact: Option<Option<EmergencyContact>>,
}

impl TenantChanges {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.date_of_birth.is_none()
            && self.government_id.is_none()
            && self.emergency_contact.is_none()
    }
}
