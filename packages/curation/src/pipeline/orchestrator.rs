//! Pipeline orchestrator - strictly sequential stage driver.

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::error::{CurationError, Result};
use crate::pipeline::classify::classify_feed;
use crate::pipeline::dedup::resolve_duplicates;
use crate::pipeline::digest::synthesize_digest;
use crate::traits::inference::Inference;
use crate::traits::ingestor::Ingestor;
use crate::traits::store::{CorpusStore, SubscriberStore};
use crate::types::article::Corpus;
use crate::types::config::PipelineConfig;

/// What one pipeline run accomplished.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Identifier stamped on the run's log lines
    pub run_id: Uuid,

    /// Raw items the ingestor delivered
    pub items_ingested: usize,

    /// Articles that survived classification
    pub classified: usize,

    /// Classifier batches whose responses were discarded
    pub batches_failed: usize,

    /// Articles removed as duplicates
    pub removed: usize,

    /// Articles in the final corpus
    pub final_len: usize,
}

/// Drives the pipeline stages in order against pluggable backends.
///
/// Stages run one at a time with a settle pause between them. Within
/// classification and duplicate resolution, model failures degrade the
/// output rather than abort; everything else (ingest, storage, digest
/// synthesis) halts the run on first failure.
pub struct Orchestrator {
    ingestor: Arc<dyn Ingestor>,
    inference: Arc<dyn Inference>,
    corpus_store: Arc<dyn CorpusStore>,
    subscriber_store: Arc<dyn SubscriberStore>,
    config: PipelineConfig,
}

impl Orchestrator {
    /// Wire an orchestrator from its backends.
    pub fn new(
        ingestor: Arc<dyn Ingestor>,
        inference: Arc<dyn Inference>,
        corpus_store: Arc<dyn CorpusStore>,
        subscriber_store: Arc<dyn SubscriberStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            ingestor,
            inference,
            corpus_store,
            subscriber_store,
            config,
        }
    }

    /// Run the feed pipeline: ingest, classify, store, resolve
    /// duplicates, store again.
    ///
    /// The first stage failure halts the run; nothing later executes.
    pub async fn run(&self) -> Result<RunSummary> {
        let run_id = Uuid::new_v4();
        info!(%run_id, "Pipeline run starting");

        let items = Self::stage("ingest", run_id, self.ingestor.fetch()).await?;
        let items_ingested = items.len();
        info!(%run_id, items = items_ingested, "Ingest complete");
        self.settle().await;

        let outcome = classify_feed(items, &self.config.classifier, self.inference.as_ref()).await;
        let classified = outcome.corpus.len();
        let batches_failed = outcome.batches_failed;
        info!(
            %run_id,
            classified,
            failed_batches = batches_failed,
            "Classification complete"
        );

        Self::stage(
            "store_classified",
            run_id,
            self.corpus_store.store(&outcome.corpus),
        )
        .await?;
        self.settle().await;

        // Reload instead of reusing the in-memory corpus so the run
        // exercises the same artifact the digest path will read.
        let corpus = Self::stage("reload_corpus", run_id, self.load_corpus_required()).await?;
        let resolved = resolve_duplicates(corpus, self.inference.as_ref()).await;
        info!(
            %run_id,
            removed = resolved.removed.len(),
            "Duplicate resolution complete"
        );

        Self::stage(
            "store_resolved",
            run_id,
            self.corpus_store.store(&resolved.corpus),
        )
        .await?;

        let summary = RunSummary {
            run_id,
            items_ingested,
            classified,
            batches_failed,
            removed: resolved.removed.len(),
            final_len: resolved.corpus.len(),
        };
        info!(%run_id, final_len = summary.final_len, "Pipeline run finished");
        Ok(summary)
    }

    /// Generate and persist a digest for one subscriber.
    ///
    /// The corpus loads before any inference runs, so a missing artifact
    /// fails the call without model spend. Safe to call repeatedly; each
    /// call overwrites the stored digest.
    pub async fn generate_digest(&self, subscriber_id: &str) -> Result<String> {
        let subscriber = self
            .subscriber_store
            .get_by_id(subscriber_id)
            .await?
            .ok_or_else(|| CurationError::SubscriberNotFound {
                id: subscriber_id.to_string(),
            })?;

        let corpus = self.load_corpus_required().await?;
        let document = synthesize_digest(&subscriber, &corpus, self.inference.as_ref()).await?;
        self.subscriber_store
            .set_digest(&subscriber.id, &document)
            .await?;

        info!(
            subscriber = %subscriber.id,
            chars = document.len(),
            "Digest stored"
        );
        Ok(document)
    }

    /// Load the stored corpus, failing if none exists yet.
    async fn load_corpus_required(&self) -> Result<Corpus> {
        self.corpus_store
            .load()
            .await?
            .ok_or_else(|| CurationError::MissingArtifact {
                artifact: "corpus".to_string(),
            })
    }

    /// Run one stage, wrapping any failure with the stage name.
    async fn stage<T, F>(name: &'static str, run_id: Uuid, fut: F) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
    {
        match fut.await {
            Ok(value) => Ok(value),
            Err(e) => {
                error!(%run_id, stage = name, error = %e, "Pipeline stage failed, halting run");
                Err(CurationError::Stage {
                    stage: name,
                    source: Box::new(e),
                })
            }
        }
    }

    /// Pause between stages.
    async fn settle(&self) {
        if !self.config.settle_delay.is_zero() {
            tokio::time::sleep(self.config.settle_delay).await;
        }
    }
}
