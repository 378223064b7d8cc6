//! Aggregate short-circuit and reranker hand-off.

use tracing::debug;

use crate::config::AppMode;
use crate::error::SearchError;
use crate::rerank::Reranker;
use crate::types::{Passage, SearchResult};

/// Turn the merged hits into the final response.
///
/// An empty aggregate returns `{results: []}` without calling the reranker.
/// Otherwise the reranker is called exactly once with the whole pool and its
/// ordering is returned as-is, truncated to `top_k`.
///
/// # Errors
///
/// Propagates the reranker's error; the caller turns it into the response's
/// `error` field.
pub async fn finalize<R: Reranker>(
    reranker: &R,
    query: &str,
    merged: Vec<Passage>,
    top_k: usize,
    app_mode: AppMode,
) -> Result<SearchResult, SearchError> {
    if merged.is_empty() {
        if app_mode.is_evaluation() {
            debug!("no passages found, returning empty results");
        }
        return Ok(SearchResult::empty());
    }

    let candidates = merged.len();
    let mut ranked = reranker.rank(query, merged, top_k).await?;
    ranked.truncate(top_k);

    if app_mode.is_evaluation() {
        debug!(candidates, ranked = ?ranked, "ranked results");
    } else {
        debug!(candidates, returned = ranked.len(), "reranking complete");
    }
    Ok(SearchResult::ranked(ranked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RankedPassage;
    use serde_json::Map;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Reverses its input and counts how often it is called.
    #[derive(Default)]
    struct CountingReranker {
        calls: AtomicUsize,
        ignore_top_n: bool,
    }

    impl Reranker for CountingReranker {
        async fn rank(
            &self,
            _query: &str,
            passages: Vec<Passage>,
            top_n: usize,
        ) -> Result<Vec<RankedPassage>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut ranked: Vec<RankedPassage> = passages
                .into_iter()
                .rev()
                .enumerate()
                .map(|(i, passage)| RankedPassage {
                    passage,
                    relevance_score: 1.0 / (i as f64 + 1.0),
                })
                .collect();
            if !self.ignore_top_n {
                ranked.truncate(top_n);
            }
            Ok(ranked)
        }
    }

    struct DownReranker;

    impl Reranker for DownReranker {
        async fn rank(
            &self,
            _query: &str,
            _passages: Vec<Passage>,
            _top_n: usize,
        ) -> Result<Vec<RankedPassage>, SearchError> {
            Err(SearchError::Rerank("model not loaded".into()))
        }
    }

    fn passages(n: usize) -> Vec<Passage> {
        (0..n)
            .map(|i| Passage {
                id: format!("p{i}"),
                collection: "docs".into(),
                text: format!("passage {i}"),
                score: 0.0,
                metadata: Map::new(),
            })
            .collect()
    }

    #[tokio::test]
    async fn empty_aggregate_skips_reranker() {
        let reranker = CountingReranker::default();
        let result = finalize(&reranker, "q", Vec::new(), 5, AppMode::RagEvaluation)
            .await
            .expect("finalize");
        assert_eq!(result, SearchResult::empty());
        assert_eq!(reranker.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reranker_order_is_preserved() {
        let reranker = CountingReranker::default();
        let result = finalize(&reranker, "q", passages(8), 5, AppMode::Normal)
            .await
            .expect("finalize");
        let ids: Vec<&str> = result.results.iter().map(|r| r.passage.id.as_str()).collect();
        assert_eq!(ids, vec!["p7", "p6", "p5", "p4", "p3"]);
        assert_eq!(reranker.calls.load(Ordering::SeqCst), 1);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn oversized_ranking_is_truncated() {
        let reranker = CountingReranker {
            ignore_top_n: true,
            ..Default::default()
        };
        let result = finalize(&reranker, "q", passages(8), 3, AppMode::Normal)
            .await
            .expect("finalize");
        assert_eq!(result.results.len(), 3);
    }

    #[tokio::test]
    async fn reranker_failure_propagates() {
        let err = finalize(&DownReranker, "q", passages(2), 5, AppMode::Normal)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("model not loaded"));
    }
}
