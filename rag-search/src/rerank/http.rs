//! Remote reranker client.
//!
//! Speaks the `POST /rerank` protocol of text-embeddings-inference style
//! cross-encoder servers: the request carries the query and the candidate
//! texts, the response is a list of `{index, score}` pairs referring back to
//! positions in the submitted list.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SearchError;
use crate::rerank::Reranker;
use crate::types::{Passage, RankedPassage};

/// Connection settings for a remote rerank service.
#[derive(Debug, Clone)]
pub struct HttpRerankerConfig {
    /// Base URL of the service, e.g. `http://127.0.0.1:8080`.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for HttpRerankerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080".into(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Serialize)]
struct RerankRequest<'a> {
    query: &'a str,
    texts: Vec<&'a str>,
    raw_scores: bool,
}

#[derive(Debug, Deserialize)]
struct RerankScore {
    index: usize,
    score: f64,
}

/// Client for a remote cross-encoder rerank endpoint.
#[derive(Debug, Clone)]
pub struct HttpReranker {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpReranker {
    /// Build a client for the service described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an empty URL or zero timeout, and
    /// [`SearchError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &HttpRerankerConfig) -> Result<Self, SearchError> {
        if config.url.trim().is_empty() {
            return Err(SearchError::Config("reranker url must not be empty".into()));
        }
        if config.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "reranker timeout_seconds must be greater than 0".into(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: format!("{}/rerank", config.url.trim_end_matches('/')),
        })
    }

    /// The full rerank endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Reranker for HttpReranker {
    async fn rank(
        &self,
        query: &str,
        passages: Vec<Passage>,
        top_n: usize,
    ) -> Result<Vec<RankedPassage>, SearchError> {
        let request = {
            let body = RerankRequest {
                query,
                texts: passages.iter().map(|p| p.text.as_str()).collect(),
                raw_scores: false,
            };
            self.client.post(&self.endpoint).json(&body)
        };

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("rerank request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SearchError::Rerank(format!(
                "rerank service returned {status}: {detail}"
            )));
        }

        let scores: Vec<RerankScore> = response
            .json()
            .await
            .map_err(|e| SearchError::Rerank(format!("invalid rerank response: {e}")))?;
        debug!(candidates = passages.len(), scored = scores.len(), "rerank response");

        attach_scores(passages, scores, top_n)
    }
}

/// Pair each score with the passage it indexes, best first, at most `top_n`.
fn attach_scores(
    passages: Vec<Passage>,
    mut scores: Vec<RerankScore>,
    top_n: usize,
) -> Result<Vec<RankedPassage>, SearchError> {
    scores.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let count = passages.len();
    let mut slots: Vec<Option<Passage>> = passages.into_iter().map(Some).collect();
    let mut ranked = Vec::with_capacity(top_n.min(scores.len()));
    for RerankScore { index, score } in scores {
        if ranked.len() == top_n {
            break;
        }
        let slot = slots.get_mut(index).ok_or_else(|| {
            SearchError::Rerank(format!("index {index} out of range for {count} passages"))
        })?;
        let passage = slot
            .take()
            .ok_or_else(|| SearchError::Rerank(format!("index {index} ranked twice")))?;
        ranked.push(RankedPassage {
            passage,
            relevance_score: score,
        });
    }
    Ok(ranked)
}
