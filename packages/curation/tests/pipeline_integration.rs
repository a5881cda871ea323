//! Integration tests for the full curation pipeline.
//!
//! These tests drive the orchestrator end to end over in-memory
//! backends and a scripted model:
//! 1. Ingest staged items
//! 2. Classify in batches
//! 3. Resolve duplicates
//! 4. Generate digests

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use curation::testing::MockInference;
use curation::{
    ClassifierConfig, Corpus, CorpusStore, CurationError, MemoryStore, Orchestrator,
    PipelineConfig, RawItem, Result, SubscriberProfile, SubscriberStore,
};
use serde_json::json;

/// Helper to stage n raw items.
fn raw_items(n: usize) -> Vec<RawItem> {
    (0..n)
        .map(|i| {
            RawItem::new("Wire", format!("Raw headline {}", i))
                .with_summary(format!("Raw summary {}", i))
        })
        .collect()
}

/// Helper to build a classifier reply covering the given headlines.
fn classify_reply(headlines: &[&str]) -> serde_json::Value {
    let articles: Vec<_> = headlines
        .iter()
        .enumerate()
        .map(|(i, headline)| {
            json!({
                "id": i + 1,
                "headline": headline,
                "summary": format!("Cleaned summary of {}", headline),
                "primary_tag": "Technology",
                "secondary_tags": ["Artificial Intelligence"],
                "source": "Wire",
                "date": "2026-08-25 09:00",
                "importance_score": 6,
                "link": "https://example.com"
            })
        })
        .collect();
    json!({ "articles": articles })
}

/// Helper to wire an orchestrator over one memory store.
fn orchestrator(
    store: &Arc<MemoryStore>,
    mock: MockInference,
    classifier: ClassifierConfig,
) -> Orchestrator {
    Orchestrator::new(
        store.clone(),
        Arc::new(mock),
        store.clone(),
        store.clone(),
        PipelineConfig::new()
            .with_classifier(classifier)
            .with_settle_delay(Duration::ZERO),
    )
}

#[tokio::test]
async fn test_full_run_classifies_dedupes_and_stores() {
    let store = Arc::new(MemoryStore::new().with_raw_items(raw_items(3)));
    let mock = MockInference::new()
        .with_reply_json(classify_reply(&["Story A", "Story B"]))
        .with_reply_json(classify_reply(&["Story C"]))
        .with_reply_json(json!({"remove_ids": [2]}));

    let orchestrator = orchestrator(&store, mock, ClassifierConfig::new().with_batch_size(2));
    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.items_ingested, 3);
    assert_eq!(summary.classified, 3);
    assert_eq!(summary.batches_failed, 0);
    assert_eq!(summary.removed, 1);
    assert_eq!(summary.final_len, 2);

    let corpus = store.load().await.unwrap().unwrap();
    assert_eq!(corpus.ids(), vec![1, 3]);
    let headlines: Vec<_> = corpus.articles.iter().map(|a| a.headline.clone()).collect();
    assert_eq!(headlines, vec!["Story A", "Story C"]);
}

#[tokio::test]
async fn test_failed_batch_leaves_siblings_intact() {
    let store = Arc::new(MemoryStore::new().with_raw_items(raw_items(3)));
    let mock = MockInference::new()
        .with_reply_json(classify_reply(&["Story A"]))
        .with_reply("Sorry, I can only describe these articles in prose.")
        .with_reply_json(classify_reply(&["Story C"]))
        .with_reply_json(json!({"remove_ids": []}));

    let orchestrator = orchestrator(&store, mock, ClassifierConfig::new().with_batch_size(1));
    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.batches_failed, 1);
    assert_eq!(summary.classified, 2);
    assert_eq!(summary.final_len, 2);

    // Ids stay dense even with a hole in the middle of the batches.
    let corpus = store.load().await.unwrap().unwrap();
    assert_eq!(corpus.ids(), vec![1, 2]);
}

#[tokio::test]
async fn test_item_cap_limits_what_the_model_sees() {
    let store = Arc::new(MemoryStore::new().with_raw_items(raw_items(5)));
    let mock = Arc::new(MockInference::new().with_reply_json(json!({"articles": []})));

    let orchestrator = Orchestrator::new(
        store.clone(),
        mock.clone(),
        store.clone(),
        store.clone(),
        PipelineConfig::new()
            .with_classifier(ClassifierConfig::new().with_batch_size(20).with_max_items(2))
            .with_settle_delay(Duration::ZERO),
    );
    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.items_ingested, 5);
    assert_eq!(summary.final_len, 0);

    // One classify call; the empty corpus skips the dedup call entirely.
    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].user.contains("Raw headline 0"));
    assert!(calls[0].user.contains("Raw headline 1"));
    assert!(!calls[0].user.contains("Raw headline 2"));
}

#[tokio::test]
async fn test_dedup_refuses_to_empty_the_corpus() {
    let store = Arc::new(MemoryStore::new().with_raw_items(raw_items(2)));
    let mock = MockInference::new()
        .with_reply_json(classify_reply(&["Story A", "Story B"]))
        .with_reply_json(json!({"remove_ids": [1, 2]}));

    let orchestrator = orchestrator(&store, mock, ClassifierConfig::new().with_batch_size(20));
    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.removed, 0);
    assert_eq!(summary.final_len, 2);
    assert_eq!(store.load().await.unwrap().unwrap().ids(), vec![1, 2]);
}

#[tokio::test]
async fn test_failed_ingest_halts_before_any_model_call() {
    let store = Arc::new(MemoryStore::new());
    let mock = Arc::new(MockInference::new());

    let orchestrator = Orchestrator::new(
        store.clone(),
        mock.clone(),
        store.clone(),
        store.clone(),
        PipelineConfig::new().with_settle_delay(Duration::ZERO),
    );

    let err = orchestrator.run().await.unwrap_err();
    match err {
        CurationError::Stage { stage, .. } => assert_eq!(stage, "ingest"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(mock.call_count(), 0);
}

/// A corpus store that accepts nothing.
struct FailingCorpusStore;

#[async_trait]
impl CorpusStore for FailingCorpusStore {
    async fn load(&self) -> Result<Option<Corpus>> {
        Ok(None)
    }

    async fn store(&self, _corpus: &Corpus) -> Result<()> {
        Err(CurationError::Storage("disk full".into()))
    }
}

#[tokio::test]
async fn test_failed_store_halts_before_dedup() {
    let store = Arc::new(MemoryStore::new().with_raw_items(raw_items(1)));
    let mock = Arc::new(MockInference::new().with_reply_json(classify_reply(&["Story A"])));

    let orchestrator = Orchestrator::new(
        store.clone(),
        mock.clone(),
        Arc::new(FailingCorpusStore),
        store.clone(),
        PipelineConfig::new().with_settle_delay(Duration::ZERO),
    );

    let err = orchestrator.run().await.unwrap_err();
    match err {
        CurationError::Stage { stage, .. } => assert_eq!(stage, "store_classified"),
        other => panic!("unexpected error: {:?}", other),
    }

    // Classification ran, duplicate resolution never did.
    assert_eq!(mock.call_count(), 1);
}

fn seeded_corpus() -> Corpus {
    let reply = classify_reply(&["Chip fab announced", "Sports upset"]);
    serde_json::from_value(reply).unwrap()
}

#[tokio::test]
async fn test_digest_generates_persists_and_escapes() {
    let store = Arc::new(MemoryStore::new().with_corpus(seeded_corpus()));
    let id = store
        .upsert(&SubscriberProfile::new(
            "ada@example.com",
            "Ada",
            "Lovelace",
            "semiconductors",
        ))
        .await
        .unwrap();

    let mock = Arc::new(
        MockInference::new()
            .with_reply("SOURCE: the chip fab story, annotated for relevance")
            .with_reply("**Subject:** Fabs\n\nCapex hit $4B for ACME_CORP."),
    );

    let orchestrator = Orchestrator::new(
        store.clone(),
        mock.clone(),
        store.clone(),
        store.clone(),
        PipelineConfig::new().with_settle_delay(Duration::ZERO),
    );

    let document = orchestrator.generate_digest(&id).await.unwrap();
    assert_eq!(
        document,
        "**Subject:** Fabs\n\nCapex hit \\$4B for ACME\\_CORP."
    );

    let subscriber = store.get_by_id(&id).await.unwrap().unwrap();
    assert_eq!(subscriber.digest_content.as_deref(), Some(document.as_str()));
    assert!(subscriber.digest_generated_at.is_some());

    // Stage A saw the preferences; stage B saw stage A's reply verbatim
    // plus the full section contract.
    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].user.contains("PREFERENCES: semiconductors"));
    assert!(calls[0].user.contains("Chip fab announced"));
    assert!(calls[1]
        .user
        .contains("SOURCE: the chip fab story, annotated for relevance"));
    assert!(calls[1].user.contains("daily briefing for Ada"));
    assert!(calls[1].user.contains("Company Watch"));
    assert!(calls[1]
        .user
        .contains("omit this entire section (including the header)"));
}

#[tokio::test]
async fn test_digest_without_corpus_spends_nothing() {
    let store = Arc::new(MemoryStore::new());
    let id = store
        .upsert(&SubscriberProfile::new(
            "ada@example.com",
            "Ada",
            "Lovelace",
            "chips",
        ))
        .await
        .unwrap();

    let mock = Arc::new(MockInference::new());
    let orchestrator = Orchestrator::new(
        store.clone(),
        mock.clone(),
        store.clone(),
        store.clone(),
        PipelineConfig::new().with_settle_delay(Duration::ZERO),
    );

    let err = orchestrator.generate_digest(&id).await.unwrap_err();
    assert!(matches!(err, CurationError::MissingArtifact { .. }));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_digest_for_unknown_subscriber() {
    let store = Arc::new(MemoryStore::new().with_corpus(seeded_corpus()));
    let mock = Arc::new(MockInference::new());

    let orchestrator = Orchestrator::new(
        store.clone(),
        mock.clone(),
        store.clone(),
        store.clone(),
        PipelineConfig::new().with_settle_delay(Duration::ZERO),
    );

    let err = orchestrator
        .generate_digest("user_00000000")
        .await
        .unwrap_err();
    assert!(matches!(err, CurationError::SubscriberNotFound { .. }));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_resubscribe_then_digest_still_current() {
    let store = Arc::new(MemoryStore::new().with_corpus(seeded_corpus()));
    let profile = SubscriberProfile::new("ada@example.com", "Ada", "Lovelace", "chips");
    let id = store.upsert(&profile).await.unwrap();

    let mock = Arc::new(
        MockInference::new()
            .with_reply("source material")
            .with_reply("the digest"),
    );
    let orchestrator = Orchestrator::new(
        store.clone(),
        mock.clone(),
        store.clone(),
        store.clone(),
        PipelineConfig::new().with_settle_delay(Duration::ZERO),
    );
    orchestrator.generate_digest(&id).await.unwrap();

    // Updating the profile must not clear the stored digest.
    let updated = SubscriberProfile::new("Ada@Example.com", "Ada", "King", "rail");
    let same_id = store.upsert(&updated).await.unwrap();
    assert_eq!(same_id, id);

    let subscriber = store.get_by_email("ada@example.com").await.unwrap().unwrap();
    assert_eq!(subscriber.preferences, "rail");
    assert_eq!(subscriber.digest_content.as_deref(), Some("the digest"));
}
