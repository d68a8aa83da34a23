//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use clipvote_common::{AppConfig, AppError, JwtService};
use clipvote_db::{
    create_pool, run_migrations, PgClipRepository, PgRateLimitRepository, PgSettingsRepository,
    PgVoteStore, PgVoterProfileRepository,
};
use clipvote_service::{RateLimitService, ServiceContext};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes skip the HTTP rate limiter so probes keep working
/// under load.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api_router = apply_middleware_with_config(
        create_router(),
        &config.http_rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health_router = apply_middleware(health_routes());

    api_router.merge(health_router).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = clipvote_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Apply pending migrations
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Migrations applied");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.token_expiry,
    ));

    // Create repositories
    let clip_repo = Arc::new(PgClipRepository::new(pool.clone()));
    let vote_store = Arc::new(PgVoteStore::new(pool.clone()));
    let profile_repo = Arc::new(PgVoterProfileRepository::new(pool.clone()));
    let rate_limit_repo = Arc::new(PgRateLimitRepository::new(pool.clone()));
    let settings_provider = Arc::new(PgSettingsRepository::new(pool));

    // Build service context
    let service_context = ServiceContext::new(
        clip_repo,
        vote_store,
        profile_repo,
        rate_limit_repo,
        settings_provider,
        jwt_service,
        config.vote_limits,
        config.heuristic,
        config.settings_cache,
    );

    Ok(AppState::new(service_context, config))
}

/// Spawn the periodic rate limit window purge
///
/// Runs once per window length; expired windows are harmless to keep
/// but accumulate for every voter ever seen.
fn spawn_rate_limit_purger(ctx: ServiceContext) {
    let interval_secs = u64::try_from(ctx.vote_limits().window_secs).unwrap_or(300);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        // the first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match RateLimitService::new(&ctx).purge_stale().await {
                Ok(purged) if purged > 0 => {
                    info!(purged, "Purged stale rate limit windows");
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Rate limit window purge failed"),
            }
        }
    });
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

    // Create app state
    let state = create_app_state(config).await?;

    // Background housekeeping
    spawn_rate_limit_purger(state.service_context().clone());

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
