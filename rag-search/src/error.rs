//! Error types for the rag-search crate.
//!
//! All errors use stable string messages suitable for returning in the
//! `error` field of a search response. Raw passage content never appears
//! in error messages.

/// Errors that can occur while orchestrating a retrieval request.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The named collection does not exist in the vector store.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// The vector store failed to resolve or query a collection.
    #[error("store error: {0}")]
    Store(String),

    /// The reranker rejected the request or returned an unusable ranking.
    #[error("rerank error: {0}")]
    Rerank(String),

    /// An HTTP request to a remote collaborator failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The search request itself is malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A retrieval task panicked or was cancelled.
    #[error("task error: {0}")]
    Task(String),
}

/// Convenience type alias for rag-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
