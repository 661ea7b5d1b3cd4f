//! Authentication utilities

mod jwt;
mod password;
mod token_hash;

pub use jwt::{AccessClaims, JwtService, RefreshClaims};
pub use password::{hash_password, validate_password_strength, verify_password};
pub use token_hash::hash_refresh_token;
