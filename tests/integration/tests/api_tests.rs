//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with migrations applied
//! - Environment variables: DATABASE_URL, JWT_ACCESS_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Signup Tests
// ============================================================================

#[tokio::test]
async fn test_signup() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    let response = server.post("/api/auth/signup", &request).await.unwrap();
    let body: DataResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(body.success);
    assert_eq!(body.data.email, request.email);
    assert_eq!(body.data.role, "client");
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    server.post("/api/auth/signup", &request).await.unwrap();

    let response = server.post("/api/auth/signup", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_signup_weak_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = SignupRequest::unique();
    request.password = "alllowercase1".to_string();

    let response = server.post("/api/auth/signup", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_sets_refresh_cookie() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();
    server.post("/api/auth/signup", &signup).await.unwrap();

    let response = server
        .post("/api/auth/login", &LoginRequest::from_signup(&signup))
        .await
        .unwrap();

    // The refresh token travels only in the Set-Cookie header
    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .expect("login must set a cookie");
    assert!(cookie.starts_with("refreshToken="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));

    let auth: AuthSuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(auth.success);
    assert!(!auth.access_token.is_empty());
    assert_eq!(auth.data.email, signup.email);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();
    server.post("/api/auth/signup", &signup).await.unwrap();

    // Wrong password
    let response = server
        .post(
            "/api/auth/login",
            &LoginRequest {
                email: signup.email.clone(),
                password: "WrongPass123".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Unknown email: same status, no account-existence hint
    let response = server
        .post(
            "/api/auth/login",
            &LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "WrongPass123".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Refresh Tests
// ============================================================================

#[tokio::test]
async fn test_refresh_rotates_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();
    server.post("/api/auth/signup", &signup).await.unwrap();
    let response = server
        .post("/api/auth/login", &LoginRequest::from_signup(&signup))
        .await
        .unwrap();
    let login: AuthSuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // First refresh consumes the login cookie and sets a replacement
    let response = server.post_empty("/api/auth/refresh").await.unwrap();
    let first: AccessTokenResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!first.access_token.is_empty());
    assert_ne!(first.access_token, login.access_token);

    // The rotated cookie keeps working
    let response = server.post_empty("/api/auth/refresh").await.unwrap();
    let second: AccessTokenResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!second.access_token.is_empty());
}

#[tokio::test]
async fn test_refresh_without_cookie() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post_empty("/api/auth/refresh").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
async fn test_logout_revokes_refresh() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();
    server.post("/api/auth/signup", &signup).await.unwrap();
    server
        .post("/api/auth/login", &LoginRequest::from_signup(&signup))
        .await
        .unwrap();

    let response = server.post_empty("/api/auth/logout").await.unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.success);

    // The cookie was cleared and the ledger emptied
    let response = server.post_empty("/api/auth/refresh").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_without_cookie_succeeds() {
    if !check_test_env().await {
        return;
    }

    // Logout is best-effort: no cookie still yields a 200
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post_empty("/api/auth/logout").await.unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(body.success);
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_get_own_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();
    server.post("/api/auth/signup", &signup).await.unwrap();
    let response = server
        .post("/api/auth/login", &LoginRequest::from_signup(&signup))
        .await
        .unwrap();
    let auth: AuthSuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let path = format!("/api/users/{}", auth.data.id);
    let response = server.get_auth(&path, &auth.access_token).await.unwrap();
    let body: DataResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.id, auth.data.id);
}

#[tokio::test]
async fn test_profile_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/users/1").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_client_cannot_read_other_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let first = SignupRequest::unique();
    server.post("/api/auth/signup", &first).await.unwrap();
    let response = server
        .post("/api/auth/login", &LoginRequest::from_signup(&first))
        .await
        .unwrap();
    let first_auth: AuthSuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let second = SignupRequest::unique();
    let response = server.post("/api/auth/signup", &second).await.unwrap();
    let second_user: DataResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/users/{}", second_user.data.id);
    let response = server.get_auth(&path, &first_auth.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_update_own_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();
    server.post("/api/auth/signup", &signup).await.unwrap();
    let response = server
        .post("/api/auth/login", &LoginRequest::from_signup(&signup))
        .await
        .unwrap();
    let auth: AuthSuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let path = format!("/api/users/{}", auth.data.id);
    let update = UpdateProfileRequest {
        first_name: Some("Renamed".to_string()),
        age: Some(30),
        ..Default::default()
    };
    let response = server.put_auth(&path, &auth.access_token, &update).await.unwrap();
    let body: DataResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.data.first_name, "Renamed");
    assert_eq!(body.data.age, Some(30));
}

#[tokio::test]
async fn test_delete_own_account() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();
    server.post("/api/auth/signup", &signup).await.unwrap();
    let response = server
        .post("/api/auth/login", &LoginRequest::from_signup(&signup))
        .await
        .unwrap();
    let auth: AuthSuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let path = format!("/api/users/{}", auth.data.id);
    let response = server.delete_auth(&path, &auth.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // The account is gone
    let response = server.get_auth(&path, &auth.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_create_admin_requires_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();
    server.post("/api/auth/signup", &signup).await.unwrap();
    let response = server
        .post("/api/auth/login", &LoginRequest::from_signup(&signup))
        .await
        .unwrap();
    let auth: AuthSuccessResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let request = SignupRequest::unique();
    let response = server
        .post_auth("/api/auth/admin", &auth.access_token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}
