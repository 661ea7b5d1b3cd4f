//! Authentication extractors
//!
//! Extract and validate access tokens from the Authorization header. The
//! access token is self-contained; no database lookup happens here.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use campus_common::AppError;
use campus_core::UserRole;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from a valid access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

impl AuthUser {
    /// Check whether this caller may act on the given account:
    /// owners and admins only
    pub fn can_access(&self, owner_id: i64) -> bool {
        self.user_id == owner_id || self.role.is_admin()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::App(AppError::MissingAuth))?;

        let app_state = AppState::from_ref(state);

        // TokenExpired passes through so clients know a refresh could help
        let claims = app_state
            .jwt_service()
            .verify_access(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Access token rejected");
                ApiError::App(e)
            })?;

        let user_id = claims.user_id().map_err(ApiError::App)?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
            role: claims.role,
        })
    }
}

/// Authenticated admin; rejects non-admin callers with 403
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.role.is_admin() {
            tracing::warn!(user_id = user.user_id, "Admin endpoint denied");
            return Err(ApiError::App(AppError::Forbidden));
        }

        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user(user_id: i64, role: UserRole) -> AuthUser {
        AuthUser {
            user_id,
            email: "a@example.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role,
        }
    }

    #[test]
    fn test_can_access_own_account() {
        assert!(auth_user(1, UserRole::Client).can_access(1));
        assert!(!auth_user(1, UserRole::Client).can_access(2));
    }

    #[test]
    fn test_admin_can_access_any_account() {
        assert!(auth_user(1, UserRole::Admin).can_access(2));
    }
}
