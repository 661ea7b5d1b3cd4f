//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{RefreshTokenRecord, User, UserRole};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Fields accepted when creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub age: Option<i32>,
    pub is_employed: bool,
    pub whatsapp_number: Option<String>,
}

/// Mutable profile fields (email, role, and password are deliberately absent)
#[derive(Debug, Clone, Default)]
pub struct UserProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub is_employed: Option<bool>,
    pub whatsapp_number: Option<String>,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user, returning the persisted entity with its assigned ID
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Update profile fields for an existing user
    async fn update_profile(&self, id: i64, update: &UserProfileUpdate) -> RepoResult<()>;

    /// Delete a user (cascades to refresh tokens at the database level)
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>>;
}

// ============================================================================
// Refresh Token Ledger
// ============================================================================

/// Persisted ledger of outstanding refresh-token hashes.
///
/// Raw token values never reach this interface; callers hash first. All
/// mutating operations are single database transactions.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Insert a new ledger row for the user
    async fn store(
        &self,
        user_id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<RefreshTokenRecord>;

    /// Look up a row by owner and hash; expired rows are treated as absent
    async fn find(&self, user_id: i64, token_hash: &str) -> RepoResult<Option<RefreshTokenRecord>>;

    /// Atomically replace one token hash with another.
    ///
    /// The delete of the old row and insert of the new row commit together.
    /// A delete that affects zero rows is tolerated: a concurrent refresh may
    /// have consumed the old row already, and this call's insert must still
    /// succeed on its own.
    async fn rotate(
        &self,
        old_token_hash: &str,
        user_id: i64,
        new_token_hash: &str,
        new_expires_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Delete every ledger row for the user (log out everywhere)
    async fn revoke_all(&self, user_id: i64) -> RepoResult<u64>;

    /// Delete all rows past their expiry; returns the number removed.
    /// Pure cleanup - `find` already filters expired rows.
    async fn sweep_expired(&self) -> RepoResult<u64>;
}
