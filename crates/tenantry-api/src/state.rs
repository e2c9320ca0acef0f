use std::sync::Arc;

use tenantry_core::repositories::{TenantRepository, UserRepository};
use tenantry_core::services::{TenantService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService<dyn UserRepository>>,
    pub tenants: Arc<TenantService<dyn TenantRepository>>,
}

impl AppState {
    pub fn new(user_repo: Arc<dyn UserRepository>, tenant_repo: Arc<dyn TenantRepository>) -> Self {
        Self {
            users: Arc::new(UserService::new(user_repo)),
            tenants: Arc::new(TenantService::new(tenant_repo)),
        }
    }
}
