//! Rerankers: second-stage relevance ordering over the pooled hits.
//!
//! [`Reranker`] is the seam the orchestrator calls exactly once per request
//! with a non-empty candidate pool. [`RerankerBackend`] selects an
//! implementation at runtime so the choice can come from configuration.

pub mod http;
pub mod local;

use std::future::Future;

use crate::error::SearchError;
use crate::types::{Passage, RankedPassage};

pub use http::{HttpReranker, HttpRerankerConfig};
pub use local::LocalReranker;

/// A relevance model ordering candidate passages for a query.
///
/// Implementations return at most `top_n` passages, most relevant first.
pub trait Reranker: Send + Sync {
    /// Rank `passages` against `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the model is unavailable or returns an
    /// unusable ranking.
    fn rank(
        &self,
        query: &str,
        passages: Vec<Passage>,
        top_n: usize,
    ) -> impl Future<Output = Result<Vec<RankedPassage>, SearchError>> + Send;
}

/// Runtime-selected reranker implementation.
#[derive(Debug, Clone)]
pub enum RerankerBackend {
    /// Order by the similarity the store already reported.
    Local(LocalReranker),
    /// Delegate to a remote rerank service.
    Http(HttpReranker),
}

impl RerankerBackend {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Http(_) => "http",
        }
    }
}

impl Reranker for RerankerBackend {
    async fn rank(
        &self,
        query: &str,
        passages: Vec<Passage>,
        top_n: usize,
    ) -> Result<Vec<RankedPassage>, SearchError> {
        match self {
            Self::Local(reranker) => reranker.rank(query, passages, top_n).await,
            Self::Http(reranker) => reranker.rank(query, passages, top_n).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[test]
    fn backend_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RerankerBackend>();
    }

    #[test]
    fn backend_names() {
        assert_eq!(RerankerBackend::Local(LocalReranker).name(), "local");
    }

    #[tokio::test]
    async fn local_backend_dispatches() {
        let backend = RerankerBackend::Local(LocalReranker);
        let passages = vec![Passage {
            id: "a".into(),
            collection: "docs".into(),
            text: "alpha".into(),
            score: 0.3,
            metadata: Map::new(),
        }];
        let ranked = backend.rank("alpha", passages, 5).await.expect("rank");
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].relevance_score - 0.3).abs() < f64::EPSILON);
    }
}
