#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use anyhow::Result;
use axum::Router;
use scribbly::api::JwtKeys;
use scribbly::config::Config;
use scribbly::create_router;
use scribbly::graceful_shutdown;
use tokio::net::TcpListener;
use tracing_subscriber::prelude::*;

const DEFAULT_RUST_LOG: &str = "scribbly=debug,tower_http=debug";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let config = Config::from_env()?;

    let app = setup_app(&config).await?;

    let listener = TcpListener::bind(config.address).await?;
    tracing::info!("Listening on {}", config.address);

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its storage
///
/// # Errors
///
/// Will return `Err` if the storage can not be reached
#[cfg(not(feature = "postgres"))]
#[allow(clippy::unused_async)]
async fn setup_app(config: &Config) -> Result<Router> {
    use scribbly::storage::Memory;

    tracing::info!("Using in-memory storage, notes are lost on shutdown");

    Ok(create_router(
        Memory::new(),
        JwtKeys::new(config.jwt_secret.as_bytes()),
    ))
}

/// Create and setup the app with its storage
///
/// # Errors
///
/// Will return `Err` if the storage can not be reached
#[cfg(feature = "postgres")]
async fn setup_app(config: &Config) -> Result<Router> {
    use scribbly::storage::DatabaseConfig;
    use scribbly::storage::Postgres;

    let storage = Postgres::from_config(DatabaseConfig::DetectConfig).await?;

    Ok(create_router(
        storage,
        JwtKeys::new(config.jwt_secret.as_bytes()),
    ))
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}
