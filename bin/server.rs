// Tech Catalog - Web Server
// REST API over the in-memory catalog for the browser front-end

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use tech_catalog::api::{router, AppState};
use tech_catalog::{init_tracing, CatalogConfig, CatalogHandle, LoggingSink, DEFAULT_BIND_ADDR};

#[derive(Parser, Debug)]
#[command(name = "catalog-server", about = "Serve the catalog over HTTP", version)]
struct Args {
    /// Listen address
    #[arg(long, env = "CATALOG_BIND", default_value = DEFAULT_BIND_ADDR)]
    bind: String,

    /// JSON seed file (defaults to the built-in dataset)
    #[arg(long, env = "CATALOG_SEED")]
    seed: Option<PathBuf>,

    /// Static front-end assets served under /static
    #[arg(long, env = "CATALOG_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    println!("🌐 Tech Catalog - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = CatalogConfig {
        seed_path: args.seed,
        bind_addr: args.bind,
        static_dir: args.static_dir,
        log_level: args.log_level,
    };

    let store = config
        .load_store()
        .with_context(|| format!("Failed to load catalog from {}", config.seed_source()))?;
    println!(
        "✓ Catalog loaded: {} items, {} timeline entries ({})",
        store.item_count(),
        store.all_timeline_entries().len(),
        config.seed_source()
    );

    let bind_addr = config.bind_addr.clone();
    let state = AppState {
        catalog: CatalogHandle::new(store),
        sink: Arc::new(LoggingSink),
        config: Arc::new(config),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    println!("\n🚀 Server running on http://{}", bind_addr);
    println!("   API: http://{}/api/items", bind_addr);
    println!("   Timeline: http://{}/api/timeline", bind_addr);
    println!("\n   Press Ctrl+C to stop\n");
    tracing::info!(addr = %bind_addr, "Listening");

    axum::serve(listener, app)
        .await
        .context("Server stopped with an error")?;

    Ok(())
}
