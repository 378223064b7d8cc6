//! Store-score reranker.
//!
//! Used when no rerank model is deployed: the pooled hits are ordered by the
//! similarity each collection reported, which makes scores from different
//! collections directly comparable only when they share an embedding space.

use crate::error::SearchError;
use crate::rerank::Reranker;
use crate::types::{Passage, RankedPassage};

/// Orders passages by their store similarity, descending.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalReranker;

impl Reranker for LocalReranker {
    async fn rank(
        &self,
        _query: &str,
        passages: Vec<Passage>,
        top_n: usize,
    ) -> Result<Vec<RankedPassage>, SearchError> {
        let mut ranked: Vec<RankedPassage> = passages
            .into_iter()
            .map(|passage| RankedPassage {
                relevance_score: passage.score,
                passage,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(top_n);
        Ok(ranked)
    }
}
