//! Search orchestrator: collection expansion, concurrent retrieval, rerank.
//!
//! This module expands the requested collections with their neighbouring
//! chunks, fans retrieval out over a bounded worker pool, merges whatever
//! the healthy collections returned, and hands the pool to the reranker.

pub mod expand;
pub mod finalize;
pub mod gather;
pub mod retrieve;
pub mod search;

use std::any::Any;

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_owned()
    }
}
