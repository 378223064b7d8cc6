//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls how many hits are pulled from each collection,
//! whether neighbouring chunks are expanded, the size of the retrieval worker
//! pool, and how verbose diagnostic logging is. It is handed to the searcher
//! at construction time; nothing in this crate reads ambient global state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SearchError;

/// Deployment mode, gating diagnostic logging verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppMode {
    /// Production: failures are summarised, raw hits are never logged.
    #[default]
    Normal,
    /// Retrieval evaluation: raw hits and per-collection failures are logged
    /// in full so result quality can be inspected.
    RagEvaluation,
}

impl AppMode {
    /// Returns the configuration-file spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::RagEvaluation => "rag-evaluation",
        }
    }

    /// Whether verbose retrieval diagnostics should be emitted.
    pub fn is_evaluation(&self) -> bool {
        matches!(self, Self::RagEvaluation)
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a retrieval search operation.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Hits requested from each collection before reranking.
    pub top_k_per_collection: usize,
    /// Also query the previous/next chunk collections of chunked identifiers.
    pub neighbor_chunk_aware: bool,
    /// Number of retrieval tasks allowed in flight at once. A value of 1
    /// queries collections one after another.
    pub max_workers: usize,
    /// Deployment mode controlling diagnostic logging.
    pub app_mode: AppMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k_per_collection: 10,
            neighbor_chunk_aware: true,
            max_workers: 4,
            app_mode: AppMode::Normal,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `top_k_per_collection` must be greater than 0
    /// - `max_workers` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.top_k_per_collection == 0 {
            return Err(SearchError::Config(
                "top_k_per_collection must be greater than 0".into(),
            ));
        }
        if self.max_workers == 0 {
            return Err(SearchError::Config(
                "max_workers must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
