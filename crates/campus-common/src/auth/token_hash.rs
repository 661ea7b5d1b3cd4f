//! Refresh token hashing
//!
//! Refresh tokens are stored server-side only as SHA-256 digests. A database
//! leak exposes hashes, not usable tokens. SHA-256 is sufficient here (no
//! slow hash needed) because the input is a high-entropy signed token, not a
//! human-chosen password.

use sha2::{Digest, Sha256};

/// Hash a raw refresh token to its lowercase hex SHA-256 digest
#[must_use]
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
