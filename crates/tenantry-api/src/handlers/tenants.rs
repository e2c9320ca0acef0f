// ============================================================================
// Tenantry API - Tenant Handlers
// File: crates/tenantry-api/src/handlers/tenants.rs
// ============================================================================

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use tenantry_core::domain::Tenant;
use tenantry_shared::utils::parse_id;

use crate::dto::{CreateTenantRequest, UpdateTenantRequest};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

fn tenant_id(raw: &str) -> Result<Uuid, ApiError> {
    parse_id(raw).ok_or_else(|| ApiError::NotFound(format!("Tenant {}", raw)))
}

/// POST /tenants
pub async fn create_tenant(
    State(state): State<AppState>,
    payload: Result<Json<CreateTenantRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Tenant>>), ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let tenant = state.tenants.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(tenant))))
}

/// GET /tenants
pub async fn list_tenants(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Tenant>>>, ApiError> {
    let tenants = state.tenants.list().await?;
    Ok(Json(ApiResponse::success(tenants)))
}

/// GET /tenants/{id}
pub async fn get_tenant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Tenant>>, ApiError> {
    let tenant_id = tenant_id(&id)?;
    state
        .tenants
        .get(&tenant_id)
        .await?
        .map(|tenant| Json(ApiResponse::success(tenant)))
        .ok_or_else(|| ApiError::NotFound(format!("Tenant {}", id)))
}

/// PUT /tenants/{id}
pub async fn update_tenant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTenantRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Tenant>>, ApiError> {
    let tenant_id = tenant_id(&id)?;
    let Json(payload) = payload?;
    payload.validate()?;

    state
        .tenants
        .update(&tenant_id, payload.into())
        .await?
        .map(|tenant| Json(ApiResponse::success(tenant)))
        .ok_or_else(|| ApiError::NotFound(format!("Tenant {}", id)))
}

/// DELETE /tenants/{id}
pub async fn delete_tenant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let tenant_id = tenant_id(&id)?;
    if state.tenants.delete(&tenant_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Tenant {}", id)))
    }
}
