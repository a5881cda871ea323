//! Duplicate resolution stage - one model pass over the whole corpus.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::pipeline::decode::{decode_response, Decoded};
use crate::pipeline::prompts::{dedup_user_payload, DEDUP_SYSTEM_PROMPT};
use crate::traits::inference::Inference;
use crate::types::article::Corpus;

/// Slim projection of an article sent to the duplicate resolver.
///
/// Only what the model needs to judge sameness; tags, scores, and links
/// stay home.
#[derive(Debug, Serialize)]
struct DedupCandidate<'a> {
    id: u32,
    headline: &'a str,
    source: &'a str,
    summary: &'a str,
}

/// Removal list from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIRemovalResponse {
    #[serde(default)]
    pub remove_ids: Vec<u32>,
}

/// Outcome of a duplicate-resolution pass.
#[derive(Debug)]
pub struct DedupResult {
    /// Corpus with duplicates removed (surviving ids unchanged)
    pub corpus: Corpus,

    /// Ids that were removed, ascending
    pub removed: Vec<u32>,
}

/// Remove redundant articles from a corpus.
///
/// The whole corpus goes to the model in one call as a slim projection;
/// the reply names ids to delete. Any failure, or a removal set that
/// would delete everything, leaves the corpus unchanged. Survivors keep
/// their ids.
pub async fn resolve_duplicates<N>(corpus: Corpus, inference: &N) -> DedupResult
where
    N: Inference + ?Sized,
{
    if corpus.is_empty() {
        debug!("Corpus empty, skipping duplicate resolution");
        return unchanged(corpus);
    }

    let candidates: Vec<DedupCandidate<'_>> = corpus
        .articles
        .iter()
        .map(|a| DedupCandidate {
            id: a.id,
            headline: &a.headline,
            source: &a.source,
            summary: &a.summary,
        })
        .collect();

    let payload = match serde_json::to_string_pretty(&candidates) {
        Ok(json) => dedup_user_payload(&json),
        Err(e) => {
            warn!(error = %e, "Failed to serialize dedup candidates, keeping corpus");
            return unchanged(corpus);
        }
    };

    info!(articles = corpus.len(), "Searching for semantic duplicates");

    let reply = match inference.complete(DEDUP_SYSTEM_PROMPT, &payload).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Duplicate resolution call failed, keeping corpus");
            return unchanged(corpus);
        }
    };

    let requested = match decode_response::<AIRemovalResponse>(&reply) {
        Decoded::Parsed(response) => response.remove_ids,
        Decoded::ParseFailure { raw, reason } => {
            warn!(
                reason,
                raw_len = raw.len(),
                "Unparseable dedup response, keeping corpus"
            );
            return unchanged(corpus);
        }
    };

    if requested.is_empty() {
        info!("No duplicates found");
        return unchanged(corpus);
    }

    // Ids the model invented are dropped before anything else happens.
    let known: HashSet<u32> = corpus.ids().into_iter().collect();
    let removal_set: HashSet<u32> = requested
        .into_iter()
        .filter(|id| known.contains(id))
        .collect();

    if removal_set.is_empty() {
        info!("Requested removals matched no known ids");
        return unchanged(corpus);
    }

    if removal_set.len() >= corpus.len() {
        warn!(
            requested = removal_set.len(),
            articles = corpus.len(),
            "Removal set would empty the corpus, refusing it"
        );
        return unchanged(corpus);
    }

    let before = corpus.len();
    let resolved = corpus.without_ids(&removal_set);
    let mut removed: Vec<u32> = removal_set.into_iter().collect();
    removed.sort_unstable();

    info!(
        removed = removed.len(),
        before,
        after = resolved.len(),
        "Duplicates removed"
    );

    DedupResult {
        corpus: resolved,
        removed,
    }
}

fn unchanged(corpus: Corpus) -> DedupResult {
    DedupResult {
        corpus,
        removed: Vec::new(),
    }
}
