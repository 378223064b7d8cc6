//! Long-lived search handle bundling a store, a reranker and configuration.

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::rerank::Reranker;
use crate::store::VectorStore;
use crate::types::{SearchRequest, SearchResult};

/// A configured searcher, shared across requests.
///
/// Configuration is validated once at construction; each call to
/// [`RagSearcher::search_rag`] is independent.
#[derive(Debug)]
pub struct RagSearcher<S, R> {
    store: Arc<S>,
    reranker: R,
    config: SearchConfig,
}

impl<S, R> RagSearcher<S, R>
where
    S: VectorStore,
    R: Reranker,
{
    /// Create a searcher owning `store`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid.
    pub fn new(store: S, reranker: R, config: SearchConfig) -> Result<Self, SearchError> {
        Self::with_shared_store(Arc::new(store), reranker, config)
    }

    /// Create a searcher over a store shared with other owners.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid.
    pub fn with_shared_store(
        store: Arc<S>,
        reranker: R,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            store,
            reranker,
            config,
        })
    }

    /// Search, never failing: errors are reported in the result's `error` field.
    pub async fn search_rag(&self, request: &SearchRequest) -> SearchResult {
        crate::search_rag(&self.store, &self.reranker, request, &self.config).await
    }

    /// The store being searched.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The reranker in use.
    pub fn reranker(&self) -> &R {
        &self.reranker
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::rerank::LocalReranker;

    #[test]
    fn invalid_config_rejected_at_construction() {
        let config = SearchConfig {
            max_workers: 0,
            ..Default::default()
        };
        let err = RagSearcher::new(MemoryStore::new(), LocalReranker, config).unwrap_err();
        assert!(err.to_string().contains("max_workers"));
    }

    #[tokio::test]
    async fn unknown_collections_yield_empty_results() {
        let searcher =
            RagSearcher::new(MemoryStore::new(), LocalReranker, SearchConfig::default())
                .expect("searcher");
        let result = searcher
            .search_rag(&SearchRequest::new(["nowhere"], "anything", "qa"))
            .await;
        assert_eq!(result, SearchResult::empty());
    }
}
