//! Route definitions
//!
//! All API routes mounted under /api; health probes live at the root so
//! they bypass rate limiting.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, health, users};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API routes
fn api_routes() -> Router<AppState> {
    Router::new().merge(auth_routes()).merge(user_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/admin", post(auth::create_admin))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id", get(users::get_profile))
        .route("/users/:user_id", put(users::update_profile))
        .route("/users/:user_id", delete(users::delete_account))
}
