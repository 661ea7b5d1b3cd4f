//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use campus_common::{AppConfig, AppError, JwtService};
use campus_core::RefreshTokenRepository;
use campus_db::{create_pool, PgRefreshTokenRepository, PgUserRepository};
use campus_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Interval between expired-token sweeps
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();
    let router = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    // Health probes skip the rate limiter
    let router = router.merge(health_routes());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = campus_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.jwt.shares_secret() {
        warn!("JWT_REFRESH_SECRET not set; both token classes are signed with the access secret");
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.access_secret,
        &config.jwt.refresh_secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let refresh_token_repo = Arc::new(PgRefreshTokenRepository::new(pool.clone()));

    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .refresh_token_repo(refresh_token_repo.clone())
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    spawn_token_sweeper(refresh_token_repo);

    Ok(AppState::new(service_context, config))
}

/// Periodically delete expired refresh token rows.
///
/// Lookups already ignore expired rows, so this is pure storage hygiene.
fn spawn_token_sweeper(repo: Arc<PgRefreshTokenRepository>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            match repo.sweep_expired().await {
                Ok(0) => {}
                Ok(removed) => info!(removed, "Swept expired refresh tokens"),
                Err(e) => warn!(error = %e, "Refresh token sweep failed"),
            }
        }
    });
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
