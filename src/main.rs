//! VoyageFlow - A state-managed HTTP service for multi-step trip booking
//!
//! This is the main entry point for the voyageflow application.

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use voyageflow::{
    api::create_router,
    catalog::Catalog,
    config::Config,
    state::AppState,
    storage::{FileStore, KeyValueStore, MemoryStore},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("voyageflow={},tower_http=info", config.log_level()))
        .init();

    info!("Starting voyageflow server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, ephemeral={}",
          config.host, config.port, config.ephemeral);

    let storage: Arc<dyn KeyValueStore> = if config.ephemeral {
        info!("Using in-memory storage");
        Arc::new(MemoryStore::new())
    } else {
        let dir = config.storage_dir();
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open storage at {}", dir.display()))?;
        info!("Using file storage at {}", store.dir().display());
        Arc::new(store)
    };

    // Restore the saved booking, if any
    let state = Arc::new(AppState::load(Catalog::standard(), storage));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /actions             - Apply a booking action");
    info!("  GET  /state               - Current booking state");
    info!("  GET  /destinations        - Destination guide (?region=india|international)");
    info!("  GET  /options/:category   - Option list (travel, food, activities)");
    info!("  GET  /breakdown           - Itemised price list");
    info!("  GET  /chart               - Cost chart data");
    info!("  GET  /confirmation        - Confirmation summary");
    info!("  GET  /registration        - Submitted registration");
    info!("  GET  /events              - State change stream");
    info!("  GET  /health              - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
