// ============================================================================
// Tenantry API - User Handlers
// File: crates/tenantry-api/src/handlers/users.rs
// ============================================================================
//! `/users` CRUD. An id that does not parse is treated like an unknown id.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use tenantry_core::domain::User;
use tenantry_shared::utils::parse_id;

use crate::dto::{CreateUserRequest, UpdateUserRequest};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

fn user_id(raw: &str) -> Result<Uuid, ApiError> {
    parse_id(raw).ok_or_else(|| ApiError::NotFound(format!("User {}", raw)))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = state.users.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(ApiResponse::success(users)))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user_id = user_id(&id)?;
    match state.users.get(&user_id).await? {
        Some(user) => Ok(Json(ApiResponse::success(user))),
        None => Err(ApiError::NotFound(format!("User {}", id))),
    }
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user_id = user_id(&id)?;
    let Json(payload) = payload?;
    payload.validate()?;

    match state.users.update(&user_id, payload.into()).await? {
        Some(user) => Ok(Json(ApiResponse::success(user))),
        None => Err(ApiError::NotFound(format!("User {}", id))),
    }
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = user_id(&id)?;
    if state.users.delete(&user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("User {}", id)))
    }
}
