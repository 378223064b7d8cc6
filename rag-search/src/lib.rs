//! # rag-search
//!
//! Query-time orchestration for retrieval-augmented generation.
//!
//! Given a request naming one or more document collections, this crate
//! produces a reranked list of passages relevant to a query. The vector store
//! and the rerank model are collaborators behind the [`VectorStore`] and
//! [`Reranker`] traits; this crate only decides what to ask them and how to
//! combine their answers.
//!
//! ## Design
//!
//! - Chunked collections (`{mode}-{n}__{base}`) are expanded with their
//!   previous and next chunks so answers keep surrounding context
//! - Collections are queried concurrently on a bounded worker pool
//! - Graceful degradation: a collection that fails or panics contributes
//!   nothing, the others still return results
//! - The merged pool is reranked once; an empty pool skips the reranker
//! - The top-level entry point never fails: errors become the `error` field
//!   of an otherwise empty [`SearchResult`]

pub mod collection;
pub mod config;
pub mod error;
pub mod memory;
pub mod orchestrator;
pub mod rerank;
pub mod searcher;
pub mod store;
pub mod types;

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use tracing::{debug, error, info};

pub use collection::{ChunkedCollection, CollectionId};
pub use config::{AppMode, SearchConfig};
pub use error::{Result, SearchError};
pub use memory::MemoryStore;
pub use rerank::{HttpReranker, HttpRerankerConfig, LocalReranker, Reranker, RerankerBackend};
pub use searcher::RagSearcher;
pub use store::VectorStore;
pub use types::{Passage, RankedPassage, RetrievalOutcome, SearchRequest, SearchResult};

/// Search the requested collections and rerank the pooled hits.
///
/// Validates `config`, expands the requested collections, queries them
/// concurrently and reranks whatever the healthy collections returned.
///
/// This function never fails. Any error or panic raised while expanding,
/// gathering or reranking is logged and returned as
/// `SearchResult { results: [], error: Some(..) }`.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// use std::sync::Arc;
/// use rag_search::{LocalReranker, MemoryStore, SearchConfig, SearchRequest};
///
/// let store = Arc::new(MemoryStore::new());
/// let request = SearchRequest::new(["qa-3__manual"], "how do I claim expenses", "qa");
/// let result = rag_search::search_rag(&store, &LocalReranker, &request, &SearchConfig::default()).await;
/// for passage in &result.results {
///     println!("{}: {}", passage.passage.collection, passage.relevance_score);
/// }
/// # }
/// ```
pub async fn search_rag<S, R>(
    store: &Arc<S>,
    reranker: &R,
    request: &SearchRequest,
    config: &SearchConfig,
) -> SearchResult
where
    S: VectorStore,
    R: Reranker,
{
    let started = Instant::now();
    info!(
        collections = ?request.collection_name,
        mode = %request.mode,
        top_k = request.top_k,
        "search started"
    );
    debug!(query = %request.query, "search query");

    let pipeline = async {
        config.validate()?;
        orchestrator::search::orchestrate_search(store, reranker, request, config).await
    };

    match AssertUnwindSafe(pipeline).catch_unwind().await {
        Ok(Ok(result)) => {
            info!(
                results = result.results.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "search completed"
            );
            result
        }
        Ok(Err(err)) => {
            error!(error = %err, "search failed");
            SearchResult::failed(err.to_string())
        }
        Err(payload) => {
            let message = orchestrator::panic_message(payload.as_ref());
            error!(panic = %message, "search panicked");
            SearchResult::failed(format!("search panicked: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_validates_config_zero_top_k_per_collection() {
        let config = SearchConfig {
            top_k_per_collection: 0,
            ..Default::default()
        };
        let store = Arc::new(MemoryStore::new());
        let request = SearchRequest::new(["docs"], "test", "qa");
        let result = search_rag(&store, &LocalReranker, &request, &config).await;
        assert!(result.results.is_empty());
        assert!(result.error.expect("error").contains("top_k_per_collection"));
    }

    #[tokio::test]
    async fn search_reports_invalid_request() {
        let store = Arc::new(MemoryStore::new());
        let request = SearchRequest::new(["docs"], "test", "qa").with_top_k(0);
        let result = search_rag(&store, &LocalReranker, &request, &SearchConfig::default()).await;
        assert!(result.error.expect("error").contains("top_k"));
    }

    #[tokio::test]
    async fn reranker_panic_becomes_error_result() {
        struct PanickingReranker;

        impl Reranker for PanickingReranker {
            async fn rank(
                &self,
                _query: &str,
                _passages: Vec<Passage>,
                _top_n: usize,
            ) -> std::result::Result<Vec<RankedPassage>, SearchError> {
                panic!("reranker crashed");
            }
        }

        let store = MemoryStore::new();
        store
            .insert_collection(
                "docs",
                vec![memory::CorpusEntry {
                    id: "d1".into(),
                    text: "quarterly report".into(),
                    metadata: serde_json::Map::new(),
                }],
            )
            .await;
        let request = SearchRequest::new(["docs"], "quarterly", "qa");
        let result = search_rag(
            &Arc::new(store),
            &PanickingReranker,
            &request,
            &SearchConfig::default(),
        )
        .await;
        assert!(result.results.is_empty());
        assert!(result.error.expect("error").contains("reranker crashed"));
    }
}
