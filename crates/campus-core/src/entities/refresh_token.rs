//! Refresh token ledger record
//!
//! One row per outstanding refresh credential. Only the SHA-256 digest of the
//! raw token is ever stored, so a database compromise yields nothing usable.

use chrono::{DateTime, Utc};

/// A stored refresh token hash with its expiry window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Check if the record has passed its expiry
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
