//! Classification stage - filter, clean, tag, and score raw items.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::pipeline::decode::{decode_response, Decoded};
use crate::pipeline::prompts::{classify_system_prompt, classify_user_payload};
use crate::taxonomy;
use crate::traits::inference::Inference;
use crate::types::article::{ClassifiedArticle, Corpus, RawItem};
use crate::types::config::ClassifierConfig;

/// Classifier response from the model (before renumbering).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIClassifyResponse {
    #[serde(default)]
    pub articles: Vec<AIClassifiedArticle>,
}

/// One classified article as the model emits it.
///
/// There is deliberately no `id` field. The model numbers articles
/// within its batch, but those numbers collide across batches, so the
/// merge pass assigns the real ids and serde drops the model's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIClassifiedArticle {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub primary_tag: String,
    #[serde(default)]
    pub secondary_tags: Vec<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub importance_score: i32,
    #[serde(default)]
    pub link: String,
}

/// Outcome of a classification pass.
#[derive(Debug)]
pub struct ClassifyResult {
    /// Merged, renumbered corpus
    pub corpus: Corpus,

    /// Batches submitted to the model
    pub batches_sent: usize,

    /// Batches whose responses were discarded
    pub batches_failed: usize,

    /// Items submitted after the cap
    pub items_submitted: usize,

    /// Items dropped by the cap
    pub items_dropped: usize,
}

/// Classify a raw feed into a corpus.
///
/// Items are capped at `config.max_items`, split into batches of
/// `config.batch_size`, and classified one batch at a time. A batch
/// whose call or response fails contributes nothing; sibling batches
/// are unaffected. Survivors merge in batch order and are renumbered
/// `1..=N`, so downstream stages always see dense ids.
///
/// Never fails as a whole: the worst case is an empty corpus with every
/// batch counted in `batches_failed`.
pub async fn classify_feed<N>(
    items: Vec<RawItem>,
    config: &ClassifierConfig,
    inference: &N,
) -> ClassifyResult
where
    N: Inference + ?Sized,
{
    let received = items.len();
    let mut items = items;
    if let Some(cap) = config.max_items {
        if items.len() > cap {
            info!(received, cap, "Truncating oversized feed");
            items.truncate(cap);
        }
    }
    let items_submitted = items.len();
    let items_dropped = received - items_submitted;

    let batch_size = config.batch_size.max(1);
    let system_prompt = classify_system_prompt();

    let mut survivors: Vec<AIClassifiedArticle> = Vec::new();
    let mut batches_sent = 0;
    let mut batches_failed = 0;

    for (index, batch) in items.chunks(batch_size).enumerate() {
        let batch_num = index + 1;
        batches_sent += 1;
        match classify_batch(batch, batch_num, &system_prompt, inference).await {
            Some(mut articles) => {
                debug!(batch = batch_num, kept = articles.len(), "Batch classified");
                survivors.append(&mut articles);
            }
            None => batches_failed += 1,
        }
    }

    let corpus = Corpus::new(
        survivors
            .into_iter()
            .enumerate()
            .map(|(i, wire)| into_classified(wire, i as u32 + 1))
            .collect(),
    );

    info!(
        submitted = items_submitted,
        dropped = items_dropped,
        batches = batches_sent,
        failed_batches = batches_failed,
        classified = corpus.len(),
        "Classification pass complete"
    );

    ClassifyResult {
        corpus,
        batches_sent,
        batches_failed,
        items_submitted,
        items_dropped,
    }
}

/// Classify one batch, or `None` if anything about it failed.
async fn classify_batch<N>(
    batch: &[RawItem],
    batch_num: usize,
    system_prompt: &str,
    inference: &N,
) -> Option<Vec<AIClassifiedArticle>>
where
    N: Inference + ?Sized,
{
    let payload = match serde_json::to_string_pretty(&serde_json::json!({ "articles": batch })) {
        Ok(json) => classify_user_payload(&json),
        Err(e) => {
            warn!(batch = batch_num, error = %e, "Failed to serialize batch");
            return None;
        }
    };

    let reply = match inference.complete(system_prompt, &payload).await {
        Ok(text) => text,
        Err(e) => {
            warn!(batch = batch_num, error = %e, "Inference call failed for batch");
            return None;
        }
    };

    match decode_response::<AIClassifyResponse>(&reply) {
        Decoded::Parsed(response) => Some(response.articles),
        Decoded::ParseFailure { raw, reason } => {
            warn!(
                batch = batch_num,
                reason,
                raw_len = raw.len(),
                "Unparseable batch response"
            );
            None
        }
    }
}

/// Turn a wire article into a corpus article with the given id.
///
/// Normalizes instead of rejecting: extra secondary tags truncate to
/// two, out-of-range scores clamp to `1..=10`, off-taxonomy tags are
/// kept but logged.
fn into_classified(wire: AIClassifiedArticle, id: u32) -> ClassifiedArticle {
    let mut secondary_tags = wire.secondary_tags;
    if secondary_tags.len() > 2 {
        warn!(
            id,
            count = secondary_tags.len(),
            "Truncating secondary tags to two"
        );
        secondary_tags.truncate(2);
    }

    if !wire.primary_tag.is_empty() && !taxonomy::is_primary_tag(&wire.primary_tag) {
        warn!(id, tag = %wire.primary_tag, "Primary tag not in taxonomy");
    }
    for tag in &secondary_tags {
        if !taxonomy::is_secondary_tag(tag) {
            warn!(id, tag = %tag, "Secondary tag not in taxonomy");
        }
    }

    let importance_score = wire.importance_score.clamp(1, 10);
    if importance_score != wire.importance_score {
        warn!(
            id,
            raw_score = wire.importance_score,
            clamped = importance_score,
            "Importance score out of range"
        );
    }

    ClassifiedArticle {
        id,
        headline: wire.headline,
        summary: wire.summary,
        primary_tag: wire.primary_tag,
        secondary_tags,
        source: wire.source,
        date: wire.date,
        importance_score,
        link: wire.link,
    }
}
