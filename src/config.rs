//! Configuration types for the retrieval service.
//!
//! The service reads a TOML document. Every section is optional and falls
//! back to defaults:
//!
//! ```toml
//! app_mode = "rag-evaluation"
//!
//! [retrieval]
//! top_k_per_collection = 10
//! using_neighbor_chunk_aware = true
//! max_workers = 4
//!
//! [store]
//! corpus_path = "/srv/rag/corpus.json"
//!
//! [reranker]
//! backend = "http"
//! url = "http://127.0.0.1:8080"
//! timeout_seconds = 30
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//! ```

use rag_search::{AppMode, HttpRerankerConfig, SearchConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ServiceError};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "RAG_SERVICE_CONFIG";

/// Top-level configuration for the retrieval service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Deployment mode; `rag-evaluation` enables verbose retrieval diagnostics.
    pub app_mode: AppMode,
    /// Retrieval fan-out settings.
    pub retrieval: RetrievalConfig,
    /// Vector store settings.
    pub store: StoreConfig,
    /// Reranker settings.
    pub reranker: RerankerConfig,
    /// HTTP endpoint settings.
    pub server: ServerConfig,
}

/// Retrieval fan-out configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Hits requested from each collection before reranking.
    pub top_k_per_collection: usize,
    /// Also search the previous/next chunk of chunked collections.
    pub using_neighbor_chunk_aware: bool,
    /// Retrieval tasks allowed in flight at once.
    pub max_workers: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k_per_collection: 10,
            using_neighbor_chunk_aware: true,
            max_workers: 4,
        }
    }
}

/// Vector store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON corpus loaded into the in-memory store at startup.
    /// `None` starts with an empty store.
    pub corpus_path: Option<PathBuf>,
}

/// Which reranker implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RerankerKind {
    /// Order by store similarity, no model.
    #[default]
    Local,
    /// Remote `/rerank` service.
    Http,
}

/// Reranker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankerConfig {
    /// Reranker implementation.
    pub backend: RerankerKind,
    /// Base URL of the rerank service (used by the `http` backend).
    pub url: String,
    /// Request timeout in seconds (used by the `http` backend).
    pub timeout_seconds: u64,
}

impl Default for RerankerConfig {
    fn default() -> Self {
        let http = HttpRerankerConfig::default();
        Self {
            backend: RerankerKind::Local,
            url: http.url,
            timeout_seconds: http.timeout_seconds,
        }
    }
}

impl RerankerConfig {
    /// Connection settings for the HTTP backend.
    pub fn http(&self) -> HttpRerankerConfig {
        HttpRerankerConfig {
            url: self.url.clone(),
            timeout_seconds: self.timeout_seconds,
        }
    }
}

/// HTTP endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port (`0` auto-assigns).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ServiceError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/rag-service/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("rag-service").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("rag-service")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/rag-service-config/config.toml")
        }
    }

    /// Load configuration from the first available source: `explicit`, then
    /// `$RAG_SERVICE_CONFIG`, then the default path if it exists. Falls back
    /// to defaults when none is present.
    ///
    /// # Errors
    ///
    /// Returns an error if a named file cannot be read or parsed.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self> {
        let named = explicit.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
        if let Some(path) = named {
            return Self::from_file(&path);
        }
        let default_path = Self::default_config_path();
        if default_path.exists() {
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// The search core configuration derived from this file.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            top_k_per_collection: self.retrieval.top_k_per_collection,
            neighbor_chunk_aware: self.retrieval.using_neighbor_chunk_aware,
            max_workers: self.retrieval.max_workers,
            app_mode: self.app_mode,
        }
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.search_config()
            .validate()
            .map_err(|e| ServiceError::Config(e.to_string()))?;
        if self.reranker.backend == RerankerKind::Http && self.reranker.url.trim().is_empty() {
            return Err(ServiceError::Config(
                "reranker.url is required for the http backend".into(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(ServiceError::Config("server.host must not be empty".into()));
        }
        Ok(())
    }
}
