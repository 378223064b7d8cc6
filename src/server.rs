//! HTTP endpoint for the retrieval service.
//!
//! ## Endpoints
//!
//! - `GET /health`: liveness probe
//! - `POST /search`: run a search; the body is a `SearchRequest`, the
//!   response a `SearchResult`. Search failures are reported in the
//!   response's `error` field with status 200.

use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use rag_search::{SearchRequest, SearchResult};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{Result, ServiceError};
use crate::service::ServiceSearcher;

/// Response from the `GET /health` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server is running.
    pub status: String,
}

/// Shared state for axum handlers.
#[derive(Clone)]
struct AppState {
    searcher: Arc<ServiceSearcher>,
}

/// Build the service router.
pub fn router(searcher: Arc<ServiceSearcher>) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/search", post(handle_search))
        .with_state(AppState { searcher })
}

/// HTTP server exposing a [`ServiceSearcher`].
pub struct SearchServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl SearchServer {
    /// Start the server.
    ///
    /// Binds to `{config.host}:{config.port}` (use port `0` for auto-assign)
    /// and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(searcher: Arc<ServiceSearcher>, config: &ServerConfig) -> Result<Self> {
        let app = router(searcher);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ServiceError::Server(format!("bind {bind_addr} failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| ServiceError::Server(format!("failed to get local addr: {e}")))?;

        info!("search server listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("search server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for SearchServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
    })
}

async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Json<SearchResult> {
    Json(state.searcher.search_rag(&request).await)
}
