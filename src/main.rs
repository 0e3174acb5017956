//! Bibliogate - a caching aggregation gateway for public-library open data
//!
//! Fronts the national library catalog (and a commercial fallback for book
//! lookups) with one HTTP API: search, book detail, trending and popular
//! lists, library rosters, and loan availability, memoized in an in-process
//! TTL+LRU cache.

mod api;
mod cache;
mod config;
mod error;
mod models;
mod notify;
mod services;
mod tasks;
mod upstream;
mod util;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use notify::{DiscordNotifier, NoopNotifier, Notifier};
use tasks::spawn_cleanup_task;
use upstream::{build_client, Fetcher, HttpFetcher};

/// Wires config, upstream client, cache, and router together, then serves
/// until SIGINT or SIGTERM.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bibliogate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "bibliogate starting");

    let config = Config::from_env();
    info!(
        max_entries = config.max_entries,
        default_ttl_secs = config.default_ttl,
        port = config.server_port,
        sweep_interval_secs = config.cleanup_interval,
        "configuration loaded"
    );

    // One HTTP client serves the catalog, the fallback, and the notifier
    let client = build_client(&config)?;
    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(client.clone(), &config));
    let notifier: Arc<dyn Notifier> = match &config.discord_webhook_url {
        Some(url) => {
            info!("Discord notifications enabled");
            Arc::new(DiscordNotifier::new(client, url.clone()))
        }
        None => {
            info!("notifications disabled, DISCORD_WEBHOOK_URL not set");
            Arc::new(NoopNotifier)
        }
    };

    let state = AppState::new(fetcher, notifier, &config);
    let sweeper = spawn_cleanup_task(state.cache.clone(), config.cleanup_interval);

    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper))
        .await?;

    info!("gateway stopped");
    Ok(())
}

/// Resolves when SIGINT or SIGTERM arrives, stopping the sweeper on the way
/// out so axum can drain in-flight requests.
async fn shutdown_signal(sweeper: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("ctrl-c handler failed to install");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler failed to install")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received, draining"),
        _ = terminate => info!("SIGTERM received, draining"),
    }

    sweeper.abort();
    info!("sweep task stopped");
}
