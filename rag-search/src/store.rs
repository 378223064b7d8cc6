//! Trait definition for pluggable vector store backends.
//!
//! The orchestrator resolves each collection by name and then runs a top-k
//! similarity query against the resolved handle. Embedding the query text and
//! the layout of the index are the store's business.

use std::future::Future;

use crate::error::SearchError;
use crate::types::Passage;

/// A vector store holding independently queryable collections.
///
/// All implementations must be `Send + Sync + 'static`: retrieval tasks are
/// spawned onto the runtime and share the store through an `Arc`.
pub trait VectorStore: Send + Sync + 'static {
    /// Handle to a resolved collection.
    type Collection: Send + Sync;

    /// Resolve a collection by name.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::CollectionNotFound`] for unknown collections and
    /// [`SearchError::Store`] when the store cannot be reached.
    fn get_collection(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Self::Collection, SearchError>> + Send;

    /// Run a similarity query, returning at most `top_k` hits, closest first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Store`] if the query cannot be executed.
    fn query(
        &self,
        collection: &Self::Collection,
        query: &str,
        top_k: usize,
    ) -> impl Future<Output = Result<Vec<Passage>, SearchError>> + Send;
}
