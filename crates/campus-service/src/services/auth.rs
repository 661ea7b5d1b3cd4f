//! Authentication service
//!
//! Handles account registration, login, token refresh, and logout. The
//! refresh token ledger only ever sees SHA-256 digests of tokens.

use campus_common::{hash_password, hash_refresh_token, validate_password_strength, AppError};
use campus_core::{NewUser, User, UserRole};
use tracing::{info, instrument, warn};

use crate::dto::{is_valid_whatsapp_number, CreateAdminRequest, LoginRequest, SignupRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Outcome of a successful login or refresh
///
/// The raw refresh token exists only here and in the Set-Cookie header the
/// API layer builds from it; it is never persisted or logged.
#[derive(Debug)]
pub struct AuthSession {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new client account
    ///
    /// Registration does not log the user in; the account is created and the
    /// client follows up with a login request.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<User> {
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        if let Some(number) = &request.whatsapp_number {
            if !is_valid_whatsapp_number(number) {
                return Err(ServiceError::validation(
                    "WhatsApp number must be in international format (+ followed by 8-15 digits)",
                ));
            }
        }

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash = hash_password_blocking(request.password).await?;

        let new_user = NewUser {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            role: UserRole::Client,
            age: request.age,
            is_employed: request.is_employed,
            whatsapp_number: request.whatsapp_number,
        };

        let user = self.ctx.user_repo().create(&new_user, &password_hash).await?;

        info!(user_id = user.id, "User registered");

        Ok(user)
    }

    /// Create an admin account; the API layer restricts this to admins
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_admin(&self, request: CreateAdminRequest) -> ServiceResult<User> {
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash = hash_password_blocking(request.password).await?;

        let new_user = NewUser {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            role: UserRole::Admin,
            age: None,
            is_employed: false,
            whatsapp_number: None,
        };

        let user = self.ctx.user_repo().create(&new_user, &password_hash).await?;

        info!(user_id = user.id, "Admin account created");

        Ok(user)
    }

    /// Login with email and password, issuing a fresh token pair
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthSession> {
        // A missing user and a wrong password produce the same error
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let is_valid = verify_password_blocking(request.password, password_hash).await?;
        if !is_valid {
            warn!(user_id = user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let session = self.issue_session(user).await?;

        info!(user_id = session.user.id, "User logged in");

        Ok(session)
    }

    /// Exchange a valid refresh token for a new token pair
    ///
    /// The presented token is rotated out: its ledger row is replaced by the
    /// new token's hash in one transaction, so each refresh token works once.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<AuthSession> {
        let claims = self
            .ctx
            .jwt_service()
            .verify_refresh(refresh_token)
            .map_err(ServiceError::from)?;
        let user_id = claims.user_id().map_err(ServiceError::from)?;

        // Signature checks out, but the ledger decides: a rotated-away or
        // revoked token has no row and is rejected identically to a forgery
        let old_hash = hash_refresh_token(refresh_token);
        self.ctx
            .refresh_token_repo()
            .find(user_id, &old_hash)
            .await?
            .ok_or_else(|| {
                warn!(user_id, "Refresh rejected: token not in ledger");
                ServiceError::App(AppError::RefreshRevoked)
            })?;

        // The account may have been deleted after the token was issued
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let access_token = self.ctx.jwt_service().sign_access(&user)?;
        let new_refresh = self.ctx.jwt_service().sign_refresh(user.id)?;
        let new_hash = hash_refresh_token(&new_refresh);
        let expires_at = self.ctx.jwt_service().refresh_expires_at();

        self.ctx
            .refresh_token_repo()
            .rotate(&old_hash, user.id, &new_hash, expires_at)
            .await?;

        info!(user_id = user.id, "Tokens refreshed");

        Ok(AuthSession {
            user,
            access_token,
            refresh_token: new_refresh,
        })
    }

    /// Log out the session owner, revoking every outstanding refresh token
    /// for the account
    ///
    /// Best-effort: an unverifiable token never blocks logout, since the
    /// client clears its cookie either way.
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, refresh_token: &str) -> ServiceResult<u64> {
        let user_id = match self
            .ctx
            .jwt_service()
            .verify_refresh(refresh_token)
            .and_then(|claims| claims.user_id())
        {
            Ok(id) => id,
            Err(_) => {
                warn!("Invalid refresh token during logout");
                return Ok(0);
            }
        };

        let revoked = self.ctx.refresh_token_repo().revoke_all(user_id).await?;

        info!(user_id, revoked, "User logged out");

        Ok(revoked)
    }

    /// Issue an access/refresh pair for the user and record the refresh
    /// token's hash in the ledger
    async fn issue_session(&self, user: User) -> ServiceResult<AuthSession> {
        let access_token = self.ctx.jwt_service().sign_access(&user)?;
        let refresh_token = self.ctx.jwt_service().sign_refresh(user.id)?;

        let token_hash = hash_refresh_token(&refresh_token);
        let expires_at = self.ctx.jwt_service().refresh_expires_at();

        self.ctx
            .refresh_token_repo()
            .store(user.id, &token_hash, expires_at)
            .await?;

        Ok(AuthSession {
            user,
            access_token,
            refresh_token,
        })
    }
}

/// Run Argon2 hashing off the async runtime; it is deliberately slow
async fn hash_password_blocking(password: String) -> ServiceResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ServiceError::internal(e.to_string()))?
        .map_err(ServiceError::from)
}

async fn verify_password_blocking(password: String, hash: String) -> ServiceResult<bool> {
    tokio::task::spawn_blocking(move || campus_common::verify_password(&password, &hash))
        .await
        .map_err(|e| ServiceError::internal(e.to_string()))?
        .map_err(ServiceError::from)
}
