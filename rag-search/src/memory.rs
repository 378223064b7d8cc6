//! In-memory vector store.
//!
//! [`MemoryStore`] keeps every collection in memory and scores passages by
//! lexical term overlap with the query. It stands in for a real vector
//! database in tests, demos and small deployments that ship a JSON corpus.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::SearchError;
use crate::store::VectorStore;
use crate::types::Passage;

/// A passage as written in a corpus file.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusEntry {
    /// Passage identifier, unique within its collection.
    pub id: String,
    /// Passage text.
    pub text: String,
    /// Optional metadata carried through to results.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// In-memory store of named passage collections.
///
/// Cloning is cheap and clones share the same collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Arc<[Passage]>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON corpus file shaped as
    /// `{"<collection>": [{"id": .., "text": .., "metadata": {..}}]}`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Store`] if the file cannot be read or parsed.
    pub async fn from_corpus_file(path: &Path) -> Result<Self, SearchError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            SearchError::Store(format!("failed to read corpus {}: {e}", path.display()))
        })?;
        let corpus: BTreeMap<String, Vec<CorpusEntry>> = serde_json::from_str(&content)
            .map_err(|e| {
                SearchError::Store(format!("failed to parse corpus {}: {e}", path.display()))
            })?;

        let store = Self::new();
        for (name, entries) in corpus {
            store.insert_collection(&name, entries).await;
        }
        Ok(store)
    }

    /// Insert or replace a collection.
    pub async fn insert_collection(
        &self,
        name: &str,
        entries: impl IntoIterator<Item = CorpusEntry>,
    ) {
        let passages: Arc<[Passage]> = entries
            .into_iter()
            .map(|entry| Passage {
                id: entry.id,
                collection: name.to_owned(),
                text: entry.text,
                score: 0.0,
                metadata: entry.metadata,
            })
            .collect();
        debug!(collection = name, count = passages.len(), "collection loaded");
        self.collections
            .write()
            .await
            .insert(name.to_owned(), passages);
    }

    /// Names of all collections, sorted.
    pub async fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}

impl VectorStore for MemoryStore {
    type Collection = Arc<[Passage]>;

    async fn get_collection(&self, name: &str) -> Result<Self::Collection, SearchError> {
        self.collections
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| SearchError::CollectionNotFound(name.to_owned()))
    }

    async fn query(
        &self,
        collection: &Self::Collection,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<Passage>, SearchError> {
        let query_terms = terms(query);
        if query_terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<Passage> = collection
            .iter()
            .filter_map(|passage| {
                let score = term_overlap(&query_terms, &passage.text);
                (score > 0.0).then(|| Passage {
                    score,
                    ..passage.clone()
                })
            })
            .collect();

        // Stable sort keeps insertion order among equal scores.
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);
        Ok(hits)
    }
}

/// Lowercased alphanumeric terms of `text`.
fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Fraction of distinct query terms present in `text`, in `[0, 1]`.
fn term_overlap(query_terms: &HashSet<String>, text: &str) -> f64 {
    let text_terms = terms(text);
    let shared = query_terms
        .iter()
        .filter(|t| text_terms.contains(*t))
        .count();
    shared as f64 / query_terms.len() as f64
}
