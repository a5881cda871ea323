//! JSON file storage for the feed and corpus artifacts.
//!
//! The pipeline hands artifacts between stages through two files in a
//! data directory: the raw feed staged by whatever ingestion produced
//! it, and the classified corpus the pipeline owns. One store covers
//! both seams.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{CurationError, Result};
use crate::traits::ingestor::Ingestor;
use crate::traits::store::CorpusStore;
use crate::types::article::{Corpus, RawFeed, RawItem};

/// File name of the staged raw feed artifact.
pub const RAW_FEED_FILE: &str = "news_feed.json";

/// File name of the classified corpus artifact.
pub const CORPUS_FILE: &str = "master_feed.json";

/// Feed and corpus artifacts as JSON files in one directory.
pub struct JsonArtifactStore {
    dir: PathBuf,
}

impl JsonArtifactStore {
    /// Create a store rooted at the given data directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the raw feed artifact.
    pub fn raw_feed_path(&self) -> PathBuf {
        self.dir.join(RAW_FEED_FILE)
    }

    /// Path of the corpus artifact.
    pub fn corpus_path(&self) -> PathBuf {
        self.dir.join(CORPUS_FILE)
    }
}

async fn read_artifact(path: &Path) -> Result<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CurationError::Storage(Box::new(e))),
    }
}

#[async_trait]
impl Ingestor for JsonArtifactStore {
    async fn fetch(&self) -> Result<Vec<RawItem>> {
        let path = self.raw_feed_path();
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CurationError::MissingArtifact {
                    artifact: RAW_FEED_FILE.to_string(),
                })
            }
            Err(e) => return Err(CurationError::Ingest(Box::new(e))),
        };

        let feed: RawFeed = serde_json::from_slice(&bytes)?;
        debug!(
            path = %path.display(),
            items = feed.articles.len(),
            "Raw feed artifact loaded"
        );
        Ok(feed.articles)
    }
}

#[async_trait]
impl CorpusStore for JsonArtifactStore {
    async fn load(&self) -> Result<Option<Corpus>> {
        match read_artifact(&self.corpus_path()).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn store(&self, corpus: &Corpus) -> Result<()> {
        let json = serde_json::to_string_pretty(corpus)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CurationError::Storage(Box::new(e)))?;
        let path = self.corpus_path();
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| CurationError::Storage(Box::new(e)))?;

        info!(
            path = %path.display(),
            articles = corpus.len(),
            "Corpus artifact written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::article::ClassifiedArticle;

    fn corpus() -> Corpus {
        Corpus::new(vec![ClassifiedArticle {
            id: 1,
            headline: "Headline".to_string(),
            summary: "Summary".to_string(),
            primary_tag: "Technology".to_string(),
            secondary_tags: vec![],
            source: "Wire".to_string(),
            date: String::new(),
            importance_score: 5,
            link: String::new(),
        }])
    }

    #[tokio::test]
    async fn test_corpus_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonArtifactStore::new(dir.path());

        store.store(&corpus()).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.ids(), vec![1]);
        assert_eq!(loaded.articles[0].headline, "Headline");
    }

    #[tokio::test]
    async fn test_missing_corpus_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonArtifactStore::new(dir.path());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_missing_feed_names_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonArtifactStore::new(dir.path());

        let err = store.fetch().await.unwrap_err();
        match err {
            CurationError::MissingArtifact { artifact } => assert_eq!(artifact, RAW_FEED_FILE),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_reads_staged_feed() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonArtifactStore::new(dir.path());

        tokio::fs::write(
            store.raw_feed_path(),
            r#"{"articles": [{"source": "Wire", "headline": "Something happened"}]}"#,
        )
        .await
        .unwrap();

        let items = store.fetch().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].headline, "Something happened");
    }

    #[tokio::test]
    async fn test_store_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonArtifactStore::new(dir.path().join("nested/data"));

        store.store(&corpus()).await.unwrap();
        assert!(store.corpus_path().exists());
    }
}
