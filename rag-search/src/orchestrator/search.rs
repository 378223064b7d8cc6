//! Core search pipeline: validate, expand, gather, rerank.

use std::sync::Arc;

use tracing::debug;

use super::expand::expand_collections;
use super::finalize::finalize;
use super::gather::gather;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::rerank::Reranker;
use crate::store::VectorStore;
use crate::types::{SearchRequest, SearchResult};

/// Run one search request end to end.
///
/// # Pipeline
///
/// 1. Validate the request (`top_k > 0`)
/// 2. Expand the requested collections with neighbouring chunks when
///    `config.neighbor_chunk_aware` is set
/// 3. Query every expanded collection on the bounded worker pool, merging
///    hits from the collections that succeed
/// 4. Return `{results: []}` if nothing was found, otherwise rerank the pool
///    once and return at most `request.top_k` passages
///
/// # Errors
///
/// Returns [`SearchError::InvalidRequest`] for a malformed request and
/// propagates reranker failures. Per-collection failures never surface here.
pub async fn orchestrate_search<S, R>(
    store: &Arc<S>,
    reranker: &R,
    request: &SearchRequest,
    config: &SearchConfig,
) -> Result<SearchResult, SearchError>
where
    S: VectorStore,
    R: Reranker,
{
    request.validate()?;

    let expanded = expand_collections(
        &request.mode,
        &request.collection_name,
        config.neighbor_chunk_aware,
    );
    debug!(
        requested = request.collection_name.len(),
        expanded = expanded.len(),
        collections = ?expanded,
        "collections expanded"
    );

    let merged = gather(store, &expanded, &request.query, config).await;
    finalize(reranker, &request.query, merged, request.top_k, config.app_mode).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{CorpusEntry, MemoryStore};
    use crate::rerank::LocalReranker;
    use serde_json::Map;

    async fn chunked_store() -> Arc<MemoryStore> {
        let store = MemoryStore::new();
        for (name, text) in [
            ("qa-1__manual", "introduction to the onboarding manual"),
            ("qa-2__manual", "laptops are issued on the first onboarding day"),
            ("qa-3__manual", "return laptops to IT when leaving"),
            ("qa-4__manual", "laptops must be encrypted"),
        ] {
            store
                .insert_collection(
                    name,
                    vec![CorpusEntry {
                        id: format!("{name}#0"),
                        text: text.into(),
                        metadata: Map::new(),
                    }],
                )
                .await;
        }
        Arc::new(store)
    }

    #[tokio::test]
    async fn neighbor_chunks_contribute_hits() {
        let store = chunked_store().await;
        let request = SearchRequest::new(["qa-3__manual"], "laptops", "qa").with_top_k(10);
        let result = orchestrate_search(&store, &LocalReranker, &request, &SearchConfig::default())
            .await
            .expect("search");
        let mut collections: Vec<&str> = result
            .results
            .iter()
            .map(|r| r.passage.collection.as_str())
            .collect();
        collections.sort_unstable();
        assert_eq!(collections, vec!["qa-2__manual", "qa-3__manual", "qa-4__manual"]);
    }

    #[tokio::test]
    async fn neighbor_expansion_can_be_disabled() {
        let store = chunked_store().await;
        let config = SearchConfig {
            neighbor_chunk_aware: false,
            ..Default::default()
        };
        let request = SearchRequest::new(["qa-3__manual"], "laptops", "qa");
        let result = orchestrate_search(&store, &LocalReranker, &request, &config)
            .await
            .expect("search");
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].passage.collection, "qa-3__manual");
    }

    #[tokio::test]
    async fn zero_top_k_is_invalid() {
        let store = chunked_store().await;
        let request = SearchRequest::new(["qa-3__manual"], "laptops", "qa").with_top_k(0);
        let err = orchestrate_search(&store, &LocalReranker, &request, &SearchConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn no_collections_yields_empty_results() {
        let store = chunked_store().await;
        let request = SearchRequest::new(Vec::<String>::new(), "laptops", "qa");
        let result = orchestrate_search(&store, &LocalReranker, &request, &SearchConfig::default())
            .await
            .expect("search");
        assert_eq!(result, SearchResult::empty());
    }
}
