//! Per-collection retrieval with failure isolation.
//!
//! A failed lookup never escapes this module: it becomes
//! [`RetrievalOutcome::Failed`] and contributes nothing to the aggregate.

use tracing::{debug, error, info};

use crate::config::AppMode;
use crate::store::VectorStore;
use crate::types::RetrievalOutcome;

/// Resolve `collection` and query it for at most `top_k` hits.
///
/// Raw hits are logged in full only in [`AppMode::RagEvaluation`]; logging
/// never changes the returned outcome.
pub async fn retrieve_collection<S: VectorStore>(
    store: &S,
    collection: &str,
    query: &str,
    top_k: usize,
    app_mode: AppMode,
) -> RetrievalOutcome {
    let hits = match store.get_collection(collection).await {
        Ok(handle) => store.query(&handle, query, top_k).await,
        Err(err) => Err(err),
    };

    match hits {
        Ok(passages) if passages.is_empty() => {
            debug!(%collection, "collection returned no hits");
            RetrievalOutcome::Empty
        }
        Ok(passages) => {
            if app_mode.is_evaluation() {
                info!(%collection, count = passages.len(), hits = ?passages, "raw search results");
            } else {
                debug!(%collection, count = passages.len(), "collection returned hits");
            }
            RetrievalOutcome::Hits(passages)
        }
        Err(err) => {
            if app_mode.is_evaluation() {
                error!(%collection, error = %err, "retrieval failed, skipping collection");
            } else {
                debug!(%collection, error = %err, "retrieval failed, skipping collection");
            }
            RetrievalOutcome::Failed(err)
        }
    }
}
