//! Error types for the retrieval service.

use rag_search::SearchError;

/// Top-level error type for service bootstrap and serving.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Search core error raised while building the searcher.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// HTTP server error.
    #[error("server error: {0}")]
    Server(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ServiceError>;
