//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Field names stay
//! snake_case on the wire; `accessToken` is the one camelCase key.

use campus_core::{User, UserRole};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// User profile response; never carries the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    pub is_employed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role,
            age: user.age,
            is_employed: user.is_employed,
            whatsapp_number: user.whatsapp_number.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Envelope for plain data responses
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Login response body; the refresh token travels in a cookie, never here
#[derive(Debug, Serialize)]
pub struct AuthSuccessResponse {
    pub success: bool,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub data: UserResponse,
}

impl AuthSuccessResponse {
    pub fn new(access_token: String, user: UserResponse) -> Self {
        Self {
            success: true,
            access_token,
            data: user,
        }
    }
}

/// Refresh response body; carries only the new access token
#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub success: bool,
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

impl AccessTokenResponse {
    pub fn new(access_token: String) -> Self {
        Self {
            success: true,
            access_token,
        }
    }
}

/// Generic success message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
