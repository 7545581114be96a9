//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, search provider setup, background session
//! purging and the Axum server lifecycle.

use crate::config::Config;
use crate::domain::clock::SystemClock;
use crate::infrastructure::search::{BingSearch, NullSearch, SearchProvider};
use crate::routes::app_router;
use crate::state::{AppState, Repositories, SessionSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// How often expired sessions are removed from the store.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Bing search (or NullSearch fallback)
/// - Hourly expired-session purge
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let search: Arc<dyn SearchProvider> = match &config.bing_api_key {
        Some(api_key) => match BingSearch::new(
            config.bing_endpoint.clone(),
            api_key.clone(),
            Duration::from_secs(config.search_timeout_seconds),
        ) {
            Ok(bing) => {
                tracing::info!("Web search enabled (Bing)");
                Arc::new(bing)
            }
            Err(e) => {
                tracing::warn!("Failed to build search client: {}. Using NullSearch.", e);
                Arc::new(NullSearch::new())
            }
        },
        None => {
            tracing::info!("Web search disabled (NullSearch)");
            Arc::new(NullSearch::new())
        }
    };

    let session_settings = SessionSettings {
        secret: config.session_secret.clone(),
        ttl: chrono::Duration::try_seconds(
            i64::try_from(config.session_ttl_seconds).unwrap_or(i64::MAX),
        )
        .context("SESSION_TTL_SECONDS is out of range")?,
        cookie_secure: config.session_cookie_secure,
    };

    let state = AppState::new(
        Repositories::postgres(Arc::new(pool)),
        search,
        Arc::new(SystemClock),
        session_settings,
    );

    tokio::spawn(purge_sessions_periodically(state.clone()));
    tracing::info!("Session purge task started");

    let app = app_router(state, &config.static_dir);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn purge_sessions_periodically(state: AppState) {
    let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
    loop {
        interval.tick().await;
        if let Err(e) = state.session_service.purge_expired().await {
            tracing::warn!(error = %e, "Failed to purge expired sessions");
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
