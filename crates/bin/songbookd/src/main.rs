//! # songbookd: the songbook daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use songbook_adapter_http_axum::state::AppState;
use songbook_adapter_storage_sqlite_sqlx::{
    Config as DatabaseConfig, SqliteArtistRepository, SqliteSongRepository,
};
use songbook_app::services::artist_service::ArtistService;
use songbook_app::services::song_service::SongService;
use songbook_app::static_auth::StaticTokenAuthenticator;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading songbook.toml")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.logging.filter).context("parsing log filter")?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .context("opening database")?;
    let pool = db.pool().clone();

    // Repositories
    let artist_service = ArtistService::new(
        SqliteArtistRepository::new(pool.clone()),
        SqliteSongRepository::new(pool.clone()),
    );
    let song_service = SongService::new(
        SqliteSongRepository::new(pool.clone()),
        SqliteArtistRepository::new(pool),
    );

    // Authentication
    let authenticator = StaticTokenAuthenticator::new(config.principals()?);
    if authenticator.is_empty() {
        tracing::warn!("no API tokens configured, the API is read-only");
    } else {
        tracing::info!(tokens = authenticator.len(), "API tokens loaded");
    }

    // HTTP
    let settings = config.api_settings()?;
    tracing::info!(policy = ?settings.policy, unknown_fields = ?settings.unknown_fields, "API settings");
    let state = AppState::new(artist_service, song_service, authenticator, settings);
    let app = songbook_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(%bind_addr, "songbookd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("songbookd stopped");
    Ok(())
}

/// Resolve on SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
