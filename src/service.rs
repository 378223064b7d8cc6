//! Searcher bootstrap from service configuration.

use rag_search::{HttpReranker, LocalReranker, MemoryStore, RagSearcher, RerankerBackend};
use tracing::info;

use crate::config::{RerankerConfig, RerankerKind, ServiceConfig};
use crate::error::Result;

/// The searcher type served by this service.
pub type ServiceSearcher = RagSearcher<MemoryStore, RerankerBackend>;

/// Build the reranker selected by `config`.
///
/// # Errors
///
/// Returns an error if the HTTP client for a remote reranker cannot be built.
pub fn build_reranker(config: &RerankerConfig) -> Result<RerankerBackend> {
    let backend = match config.backend {
        RerankerKind::Local => RerankerBackend::Local(LocalReranker),
        RerankerKind::Http => RerankerBackend::Http(HttpReranker::new(&config.http())?),
    };
    Ok(backend)
}

/// Build a searcher: load the corpus (if configured), pick the reranker and
/// validate the retrieval settings.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the corpus cannot be loaded.
pub async fn build_searcher(config: &ServiceConfig) -> Result<ServiceSearcher> {
    config.validate()?;

    let store = match config.store.corpus_path {
        Some(ref path) => MemoryStore::from_corpus_file(path).await?,
        None => MemoryStore::new(),
    };
    let collections = store.collection_names().await.len();
    let reranker = build_reranker(&config.reranker)?;

    info!(
        collections,
        reranker = reranker.name(),
        app_mode = %config.app_mode,
        max_workers = config.retrieval.max_workers,
        "searcher ready"
    );
    Ok(RagSearcher::new(store, reranker, config.search_config())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use rag_search::SearchRequest;

    #[tokio::test]
    async fn default_config_builds_empty_local_searcher() {
        let searcher = build_searcher(&ServiceConfig::default())
            .await
            .expect("searcher");
        assert_eq!(searcher.reranker().name(), "local");
        assert!(searcher.store().collection_names().await.is_empty());
    }

    #[tokio::test]
    async fn corpus_is_loaded_and_searchable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let corpus = dir.path().join("corpus.json");
        std::fs::write(
            &corpus,
            r#"{"handbook": [{"id": "h1", "text": "remote work requires manager approval"}]}"#,
        )
        .expect("write corpus");

        let mut config = ServiceConfig::default();
        config.store.corpus_path = Some(corpus);
        let searcher = build_searcher(&config).await.expect("searcher");

        let result = searcher
            .search_rag(&SearchRequest::new(["handbook"], "remote work", "qa"))
            .await;
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].passage.id, "h1");
    }

    #[tokio::test]
    async fn missing_corpus_fails_bootstrap() {
        let mut config = ServiceConfig::default();
        config.store.corpus_path = Some("/nonexistent/corpus.json".into());
        let err = build_searcher(&config).await.unwrap_err();
        assert!(matches!(err, ServiceError::Search(_)));
    }

    #[test]
    fn http_backend_selected() {
        let config = RerankerConfig {
            backend: RerankerKind::Http,
            url: "http://127.0.0.1:8080".into(),
            timeout_seconds: 10,
        };
        let backend = build_reranker(&config).expect("backend");
        assert_eq!(backend.name(), "http");
    }

    #[test]
    fn http_backend_with_zero_timeout_rejected() {
        let config = RerankerConfig {
            backend: RerankerKind::Http,
            url: "http://127.0.0.1:8080".into(),
            timeout_seconds: 0,
        };
        assert!(build_reranker(&config).is_err());
    }
}
