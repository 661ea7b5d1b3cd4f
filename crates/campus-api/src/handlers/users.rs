//! User profile handlers
//!
//! Profile endpoints are restricted to the account owner and admins.

use axum::{
    extract::{Path, State},
    Json,
};
use campus_common::AppError;
use campus_service::dto::{DataResponse, UpdateProfileRequest, UserResponse};
use campus_service::UserService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Get a user profile
///
/// GET /api/users/:user_id
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<DataResponse<UserResponse>>> {
    if !auth.can_access(user_id) {
        return Err(AppError::Forbidden.into());
    }

    let service = UserService::new(state.service_context());
    let user = service.get_profile(user_id).await?;

    Ok(Json(DataResponse::new(user.into())))
}

/// Update a user profile
///
/// PUT /api/users/:user_id
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<DataResponse<UserResponse>>> {
    if !auth.can_access(user_id) {
        return Err(AppError::Forbidden.into());
    }

    let service = UserService::new(state.service_context());
    let user = service.update_profile(user_id, request).await?;

    Ok(Json(DataResponse::new(user.into())))
}

/// Delete an account
///
/// DELETE /api/users/:user_id
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i64>,
) -> ApiResult<NoContent> {
    if !auth.can_access(user_id) {
        return Err(AppError::Forbidden.into());
    }

    let service = UserService::new(state.service_context());
    service.delete_account(user_id).await?;

    Ok(NoContent)
}
