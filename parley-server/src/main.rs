//! parley-server - Parley backend server
//!
//! REST API over the conversation store, forwarding chat turns to an
//! OpenAI-compatible completion endpoint.

use parley_core::{CompletionBackend, Database, HttpCompletionClient};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod routes;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("parley_server=info".parse()?))
        .init();

    info!("parley-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = config::Config::load()?;
    info!("Database at {:?}", config.database_path);
    info!("Upstream completions at {}", config.completions_url);

    // Open the conversation store
    let db = Database::open_path(&config.database_path)?;

    // Upstream completion client
    let completion: Arc<dyn CompletionBackend> = Arc::new(HttpCompletionClient::new(
        config.completions_url.as_str(),
        config.upstream_root.as_str(),
        config.model.as_str(),
        config.upstream_timeout,
    )?);

    let state = state::AppState::new(config, db, completion);
    let app = routes::create_router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(&state.config.bind_addr).await?;
    info!("Listening on {}", state.config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
