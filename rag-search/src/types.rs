//! Core types for retrieval requests, passages and search responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SearchError;

fn default_top_k() -> usize {
    5
}

/// A retrieval request naming the collections to search.
///
/// Immutable for the duration of one search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Collection identifiers to search. May contain duplicates.
    pub collection_name: Vec<String>,
    /// The query text.
    pub query: String,
    /// Mode tag used to recognise chunked collection identifiers.
    #[serde(default)]
    pub mode: String,
    /// Number of passages to return after reranking.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl SearchRequest {
    /// Build a request with the default `top_k`.
    pub fn new(
        collection_name: impl IntoIterator<Item = impl Into<String>>,
        query: impl Into<String>,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            collection_name: collection_name.into_iter().map(Into::into).collect(),
            query: query.into(),
            mode: mode.into(),
            top_k: default_top_k(),
        }
    }

    /// Override the number of reranked passages to return.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Reject requests that cannot produce a bounded result.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.top_k == 0 {
            return Err(SearchError::InvalidRequest(
                "top_k must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// A single hit returned by the vector store.
///
/// The orchestrator never inspects passage content; it only moves passages
/// from the store to the reranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Store-assigned passage identifier.
    pub id: String,
    /// Collection the passage was retrieved from.
    pub collection: String,
    /// Passage text.
    pub text: String,
    /// Similarity reported by the store (higher is closer).
    #[serde(default)]
    pub score: f64,
    /// Arbitrary metadata stored alongside the passage.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

/// A passage with the relevance score assigned by the reranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPassage {
    /// The underlying passage.
    #[serde(flatten)]
    pub passage: Passage,
    /// Relevance assigned by the reranker (higher is more relevant).
    pub relevance_score: f64,
}

/// The final payload of a search.
///
/// Always well formed: on failure `results` is empty and `error` carries a
/// description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Reranked passages, most relevant first.
    pub results: Vec<RankedPassage>,
    /// Set when the search failed before producing a ranking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResult {
    /// A successful search with no passages.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A successful search with the given ranking.
    pub fn ranked(results: Vec<RankedPassage>) -> Self {
        Self {
            results,
            error: None,
        }
    }

    /// A failed search.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Whether the search failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Outcome of querying one collection.
///
/// `Empty` and `Failed` both contribute nothing to the aggregate; they are
/// kept apart for diagnostics only.
#[derive(Debug)]
pub enum RetrievalOutcome {
    /// The collection returned at least one hit.
    Hits(Vec<Passage>),
    /// The collection was queried but returned nothing.
    Empty,
    /// The collection could not be resolved or queried.
    Failed(SearchError),
}

impl RetrievalOutcome {
    /// Number of passages this outcome contributes.
    pub fn len(&self) -> usize {
        match self {
            Self::Hits(passages) => passages.len(),
            Self::Empty | Self::Failed(_) => 0,
        }
    }

    /// Whether this outcome contributes no passages.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the outcome, yielding the passages it contributes.
    pub fn into_passages(self) -> Vec<Passage> {
        match self {
            Self::Hits(passages) => passages,
            Self::Empty | Self::Failed(_) => Vec::new(),
        }
    }
}
