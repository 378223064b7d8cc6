//! HTTP retrieval server.
//!
//! Usage: `rag-server [CONFIG_PATH]`. Without an argument the config is read
//! from `$RAG_SERVICE_CONFIG` or the default path, falling back to defaults.
//! Tracing output goes to stderr; set `RUST_LOG` to override the filter.

use std::path::PathBuf;
use std::sync::Arc;

use rag_service::{SearchServer, ServiceConfig, build_searcher};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rag_service=info,rag_search=info")),
        )
        .init();

    let config = ServiceConfig::load(std::env::args_os().nth(1).map(PathBuf::from))?;
    let searcher = build_searcher(&config).await?;
    let server = SearchServer::start(Arc::new(searcher), &config.server).await?;

    tracing::info!(addr = %server.addr(), "rag-server started");

    tokio::signal::ctrl_c().await?;
    server.shutdown();
    tracing::info!("rag-server shut down cleanly");
    Ok(())
}
