//! Retrieval service around the `rag-search` orchestration core.
//!
//! Loads configuration, builds a searcher over the configured store and
//! reranker, and serves it over HTTP.

pub mod config;
pub mod error;
pub mod server;
pub mod service;

pub use config::ServiceConfig;
pub use error::{Result, ServiceError};
pub use server::SearchServer;
pub use service::{ServiceSearcher, build_searcher};
