//! JWT utilities for authentication
//!
//! Provides token encoding, decoding, and validation using the `jsonwebtoken`
//! crate. Access and refresh tokens are signed with separate secrets so that
//! leaking one does not compromise the other token class.

use campus_core::{User, UserRole};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims carried by an access token
///
/// Fixed-field struct rather than a free-form map: a missing or extra claim
/// is a deserialization failure, not a silent `undefined`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Get the user ID as an integer
    ///
    /// # Errors
    /// Returns an error if the subject cannot be parsed
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub.parse::<i64>().map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Claims carried by a refresh token
///
/// Deliberately minimal: the identity claims live on the access token, and
/// the nonce guarantees two tokens minted in the same instant differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Per-issuance random value (128 bits, hex)
    pub nonce: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl RefreshClaims {
    /// Get the user ID as an integer
    ///
    /// # Errors
    /// Returns `RefreshRevoked` if the subject cannot be parsed - refresh
    /// failures never reveal more than "invalid or expired"
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub.parse::<i64>().map_err(|_| AppError::RefreshRevoked)
    }
}

/// JWT service for encoding and decoding both token classes
#[derive(Clone)]
pub struct JwtService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with separate secrets per token class
    #[must_use]
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    /// Access token lifetime in seconds
    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    /// Refresh token lifetime in seconds
    #[must_use]
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    /// Absolute expiry for a refresh token minted now; matches the claim
    /// written into the token, so the ledger row and the signature agree
    #[must_use]
    pub fn refresh_expires_at(&self) -> DateTime<Utc> {
        Utc::now() + Duration::seconds(self.refresh_token_expiry)
    }

    /// Sign an access token carrying the user's identity claims
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn sign_access(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user.id.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.access_encoding)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode access token")))
    }

    /// Sign a refresh token for the user with a fresh random nonce
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn sign_refresh(&self, user_id: i64) -> Result<String, AppError> {
        let mut nonce = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut nonce);

        let now = Utc::now();
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            nonce: hex::encode(nonce),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.refresh_token_expiry)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.refresh_encoding)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode refresh token")))
    }

    /// Decode and validate an access token
    ///
    /// Distinguishes `TokenExpired` from `InvalidToken` so clients know
    /// whether a silent refresh is worth attempting.
    ///
    /// # Errors
    /// Returns `TokenExpired` or `InvalidToken`
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, AppError> {
        // No clock-skew leeway: exp is the hard cutoff
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data =
            decode::<AccessClaims>(token, &self.access_decoding, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    _ => AppError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Decode and validate a refresh token
    ///
    /// Every failure collapses into `RefreshRevoked`: expired and tampered
    /// tokens are indistinguishable to the caller, so a forger learns nothing.
    ///
    /// # Errors
    /// Returns `RefreshRevoked` on any verification failure
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<RefreshClaims>(token, &self.refresh_decoding, &validation)
            .map_err(|_| AppError::RefreshRevoked)?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}
