mod clipboard;
mod config;
mod errors;
mod gem;
mod render;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
use crate::config::{ClipboardBackend, Config};
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gem Studio v{}", env!("CARGO_PKG_VERSION"));

    let clipboard: Arc<dyn Clipboard> = match config.clipboard_backend {
        ClipboardBackend::System => Arc::new(SystemClipboard),
        ClipboardBackend::Memory => Arc::new(MemoryClipboard::default()),
    };
    info!("Clipboard backend: {:?}", config.clipboard_backend);

    let sessions = Arc::new(SessionStore::default());
    sessions
        .clone()
        .spawn_expiry(config.session_ttl, config.session_sweep_interval);
    info!("Sessions expire after {:?} idle", config.session_ttl);

    let state = AppState {
        config: config.clone(),
        sessions,
        clipboard,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
