//! In-memory repositories for driving the router without a database.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use tenantry_api::{router, AppState};
use tenantry_core::domain::{NewTenant, Tenant, TenantChanges, User, UserRecord, UserUpdate};
use tenantry_core::error::DomainError;
use tenantry_core::repositories::{TenantRepository, UserRepository};

#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<BTreeMap<Uuid, UserRecord>>,
}

impl MemoryUsers {
    pub fn stored_hash(&self, id: &Uuid) -> Option<String> {
        self.rows.lock().unwrap().get(id).map(|r| r.password_hash.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn insert(&self, user: &UserRecord) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.values().any(|r| r.email == user.email) {
            return Err(DomainError::DatabaseError("duplicate key value".into()));
        }
        rows.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.rows.lock().unwrap().values().map(UserRecord::to_user).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.rows.lock().unwrap().get(id).map(UserRecord::to_user))
    }

    async fn update(&self, id: &Uuid, changes: &UserUpdate) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.get_mut(id) {
            if let Some(v) = &changes.full_name {
                row.full_name = v.clone();
            }
            if let Some(v) = &changes.email {
                row.email = v.clone();
            }
            if let Some(v) = &changes.password_hash {
                row.password_hash = v.clone();
            }
            if let Some(v) = &changes.role {
                row.role = v.clone();
            }
            if let Some(v) = &changes.phone {
                row.phone = v.clone();
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.rows.lock().unwrap().remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTenants {
    rows: Mutex<BTreeMap<Uuid, Tenant>>,
}

#[async_trait]
impl TenantRepository for MemoryTenants {
    async fn insert(&self, id: &Uuid, tenant: &NewTenant) -> Result<(), DomainError> {
        let row = Tenant {
            id: *id,
            full_name: tenant.full_name.clone(),
            email: tenant.email.clone(),
            phone: tenant.phone.clone(),
            date_of_birth: tenant.date_of_birth,
            government_id: tenant.government_id.clone(),
            emergency_contact: tenant.emergency_contact.clone(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().insert(*id, row);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Tenant>, DomainError> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Tenant>, DomainError> {
        Ok(self.rows.lock().unwrap().get(id).cloned())
    }

    async fn update(&self, id: &Uuid, changes: &TenantChanges) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.get_mut(id) {
            if let Some(v) = &changes.full_name {
                row.full_name = v.clone();
            }
            if let Some(v) = &changes.email {
                row.email = v.clone();
            }
            if let Some(v) = &changes.phone {
                row.phone = v.clone();
            }
            if let Some(v) = changes.date_of_birth {
                row.date_of_birth = v;
            }
            if let Some(v) = &changes.government_id {
                row.government_id = v.clone();
            }
            if let Some(v) = &changes.emergency_contact {
                row.emergency_contact = v.clone();
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.rows.lock().unwrap().remove(id);
        Ok(())
    }
}

/// Every call fails the way an unreachable database would.
pub struct BrokenUsers;

#[async_trait]
impl UserRepository for BrokenUsers {
    async fn insert(&self, _user: &UserRecord) -> Result<(), DomainError> {
        Err(DomainError::DatabaseError("pool timed out (query=INSERT INTO users ...)".into()))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        Err(DomainError::DatabaseError("pool timed out (query=SELECT ...)".into()))
    }

    async fn find_by_id(&self, _id: &Uuid) -> Result<Option<User>, DomainError> {
        Err(DomainError::DatabaseError("pool timed out (query=SELECT ...)".into()))
    }

    async fn update(&self, _id: &Uuid, _changes: &UserUpdate) -> Result<(), DomainError> {
        Err(DomainError::DatabaseError("pool timed out (query=UPDATE ...)".into()))
    }

    async fn delete(&self, _id: &Uuid) -> Result<(), DomainError> {
        Err(DomainError::DatabaseError("pool timed out (query=DELETE ...)".into()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUsers>,
}

pub fn app() -> TestApp {
    let users = Arc::new(MemoryUsers::default());
    let state = AppState::new(users.clone(), Arc::new(MemoryTenants::default()));
    TestApp { router: router(state), users }
}

pub fn broken_app() -> Router {
    router(AppState::new(Arc::new(BrokenUsers), Arc::new(MemoryTenants::default())))
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
