//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Wire shapes mirror the
//! API contract: snake_case fields, `success` flags, and an `accessToken`
//! returned in the body while the refresh token rides a cookie.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Signup request
#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub age: Option<i32>,
    pub is_employed: bool,
    pub whatsapp_number: Option<String>,
}

impl SignupRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            first_name: "Test".to_string(),
            last_name: format!("User{suffix}"),
            email: format!("test{}_{suffix}@example.com", std::process::id()),
            password: "TestPass123".to_string(),
            age: Some(25),
            is_employed: false,
            whatsapp_number: None,
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_signup(signup: &SignupRequest) -> Self {
        Self {
            email: signup.email.clone(),
            password: signup.password.clone(),
        }
    }
}

/// Profile update request
#[derive(Debug, Default, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_employed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,
}

/// User profile as returned by the API
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub age: Option<i32>,
    pub is_employed: bool,
    pub whatsapp_number: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Signup / profile envelope
#[derive(Debug, Deserialize)]
pub struct DataResponse {
    pub success: bool,
    pub data: UserResponse,
}

/// Login response: access token in the body, refresh token in the cookie
#[derive(Debug, Deserialize)]
pub struct AuthSuccessResponse {
    pub success: bool,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub data: UserResponse,
}

/// Refresh response
#[derive(Debug, Deserialize)]
pub struct AccessTokenResponse {
    pub success: bool,
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Logout response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
