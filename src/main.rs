//! Employee directory service entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use employee_directory::adapters::http::{app_router, DirectoryAppState, RateLimitState};
use employee_directory::adapters::{
    FixedWindowRateLimiter, PostgresColumnVisibilityReader, PostgresEmployeeReader,
    RedisCounterStore,
};
use employee_directory::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load_validated().context("failed to load configuration")?;

    init_tracing(&config.server);

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(Some(config.database.idle_timeout()))
        .max_lifetime(Some(config.database.max_lifetime()))
        .connect(&config.database.url)
        .await
        .context("failed to connect to PostgreSQL")?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run database migrations")?;
        tracing::info!("database migrations applied");
    }

    let counters = RedisCounterStore::connect(&config.redis)
        .await
        .context("failed to connect to Redis")?;
    let limiter = FixedWindowRateLimiter::from_config(Arc::new(counters), &config.rate_limit);
    tracing::info!(
        limit = config.rate_limit.requests_per_window,
        window_secs = config.rate_limit.window_secs,
        on_store_error = ?config.rate_limit.on_store_error,
        "rate limiter ready"
    );

    let query_timeout = config.database.query_timeout();
    let directory = DirectoryAppState::new(
        Arc::new(PostgresEmployeeReader::new(pool.clone(), query_timeout)),
        Arc::new(PostgresColumnVisibilityReader::new(pool, query_timeout)),
    );
    let rate_limit = RateLimitState::new(Arc::new(limiter), &config.rate_limit);

    let app = app_router(directory, rate_limit, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, environment = ?config.server.environment, "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    Ok(())
}

/// `RUST_LOG` wins over `server.log_level`; production logs JSON lines.
fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
