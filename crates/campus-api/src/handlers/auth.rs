//! Authentication handlers
//!
//! Endpoints for signup, login, logout, and token refresh. Refresh tokens
//! travel only in an HttpOnly cookie; access tokens only in response bodies.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use campus_common::AppError;
use campus_service::dto::{
    AccessTokenResponse, AuthSuccessResponse, CreateAdminRequest, DataResponse, LoginRequest,
    MessageResponse, SignupRequest, UserResponse,
};
use campus_service::{AuthService, AuthSession};

use crate::extractors::{AdminUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Cookie carrying the refresh token
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Register a new client account
///
/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Created<Json<DataResponse<UserResponse>>>> {
    let service = AuthService::new(state.service_context());
    let user = service.signup(request).await?;
    Ok(Created(Json(DataResponse::new(UserResponse::from(user)))))
}

/// Create an admin account (admin only)
///
/// POST /api/auth/admin
pub async fn create_admin(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateAdminRequest>,
) -> ApiResult<Created<Json<DataResponse<UserResponse>>>> {
    let service = AuthService::new(state.service_context());
    let user = service.create_admin(request).await?;
    Ok(Created(Json(DataResponse::new(UserResponse::from(user)))))
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthSuccessResponse>)> {
    let service = AuthService::new(state.service_context());
    let session = service.login(request).await?;

    let jar = jar.add(refresh_cookie(&state, &session));
    let body = AuthSuccessResponse::new(session.access_token, (&session.user).into());

    Ok((jar, Json(body)))
}

/// Exchange the refresh cookie for a new token pair
///
/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<AccessTokenResponse>)> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(AppError::NoRefreshToken)?;

    let service = AuthService::new(state.service_context());
    let session = service.refresh(&token).await?;

    let jar = jar.add(refresh_cookie(&state, &session));
    let body = AccessTokenResponse::new(session.access_token);

    Ok((jar, Json(body)))
}

/// Log out, revoking all of the account's refresh tokens
///
/// POST /api/auth/logout
///
/// Succeeds whether or not a usable refresh cookie arrives; the cookie is
/// cleared unconditionally.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    if let Some(token) = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string()) {
        let service = AuthService::new(state.service_context());
        service.logout(&token).await?;
    }

    let jar = jar.add(expired_refresh_cookie(&state));

    Ok((jar, Json(MessageResponse::new("Logout successful"))))
}

/// Build the refresh cookie for a freshly issued session
fn refresh_cookie(state: &AppState, session: &AuthSession) -> Cookie<'static> {
    let max_age = time::Duration::seconds(state.jwt_service().refresh_token_expiry());

    Cookie::build((REFRESH_COOKIE, session.refresh_token.clone()))
        .http_only(true)
        .secure(state.secure_cookies())
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .path("/")
        .build()
}

/// Build an immediately-expiring refresh cookie to clear the client's copy
fn expired_refresh_cookie(state: &AppState) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, ""))
        .http_only(true)
        .secure(state.secure_cookies())
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(0))
        .path("/")
        .build()
}
