//! Fan-out coordinator: bounded concurrent retrieval with fan-in merge.
//!
//! One task is spawned per collection; a semaphore caps how many of them
//! query the store at once. Completions are drained from a [`JoinSet`] by the
//! calling task alone, so the merged sequence is built without shared
//! mutation. Hits appear in completion order, which is not stable across
//! runs.

use std::collections::{BTreeSet, HashMap};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::{self, JoinSet};
use tracing::{debug, error};

use super::panic_message;
use super::retrieve::retrieve_collection;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::store::VectorStore;
use crate::types::{Passage, RetrievalOutcome};

type RetrievalTask = (String, Result<RetrievalOutcome, SearchError>);

/// Query every collection in `collections` and merge the hits.
///
/// At most `config.max_workers` retrievals run at once. A collection that
/// fails, or whose task panics, is logged with its name and contributes
/// nothing; the remaining collections are still merged. Returns only after
/// every dispatched task has finished.
pub async fn gather<S: VectorStore>(
    store: &Arc<S>,
    collections: &BTreeSet<String>,
    query: &str,
    config: &SearchConfig,
) -> Vec<Passage> {
    let permits = Arc::new(Semaphore::new(config.max_workers.max(1)));
    let mut tasks = JoinSet::new();
    let mut names = HashMap::with_capacity(collections.len());

    for collection in collections {
        let store = Arc::clone(store);
        let permits = Arc::clone(&permits);
        let collection = collection.clone();
        let query = query.to_owned();
        let top_k = config.top_k_per_collection;
        let app_mode = config.app_mode;

        let name = collection.clone();
        let handle = tasks.spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                let err = SearchError::Task("retrieval worker pool closed".into());
                return (collection, Err(err));
            };
            let outcome = AssertUnwindSafe(retrieve_collection(
                store.as_ref(),
                &collection,
                &query,
                top_k,
                app_mode,
            ))
            .catch_unwind()
            .await
            .map_err(|payload| {
                SearchError::Task(format!(
                    "retrieval task panicked: {}",
                    panic_message(payload.as_ref())
                ))
            });
            (collection, outcome)
        });
        names.insert(handle.id(), name);
    }

    let merged = merge_completions(tasks, &names).await;
    debug!(
        collections = collections.len(),
        passages = merged.len(),
        "gather complete"
    );
    merged
}

/// Drain `tasks` as they complete, merging hits and logging failures.
///
/// `names` maps task ids back to collection names so a task that never
/// reports back can still be attributed.
async fn merge_completions(
    mut tasks: JoinSet<RetrievalTask>,
    names: &HashMap<task::Id, String>,
) -> Vec<Passage> {
    let mut merged = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((collection, Ok(outcome))) => {
                if let RetrievalOutcome::Hits(_) = outcome {
                    debug!(%collection, count = outcome.len(), "merging collection hits");
                }
                merged.extend(outcome.into_passages());
            }
            Ok((collection, Err(err))) => {
                error!(%collection, error = %err, "retrieval task failed");
            }
            Err(err) => {
                let collection = names.get(&err.id()).map_or("<unknown>", String::as_str);
                error!(%collection, error = %err, "retrieval task did not complete");
            }
        }
    }
    merged
}
