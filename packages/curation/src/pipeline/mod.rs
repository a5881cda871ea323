//! The curation pipeline - the core of the library.
//!
//! Stages run strictly in sequence:
//! - Classification (filter, clean, tag, and score raw items in batches)
//! - Duplicate resolution (one model pass over the whole corpus)
//! - Digest generation (two-call personalization per subscriber)
//!
//! The orchestrator drives them against pluggable backends.

pub mod classify;
pub mod decode;
pub mod dedup;
pub mod digest;
pub mod orchestrator;
pub mod prompts;

pub use classify::{classify_feed, AIClassifiedArticle, AIClassifyResponse, ClassifyResult};
pub use decode::{decode_response, extract_json_object, Decoded};
pub use dedup::{resolve_duplicates, AIRemovalResponse, DedupResult};
pub use digest::{escape_markup, synthesize_digest};
pub use orchestrator::{Orchestrator, RunSummary};
pub use prompts::{
    classify_system_prompt, classify_user_payload, dedup_user_payload, relevance_payload,
    synthesis_prompt, CLASSIFY_SYSTEM_PROMPT, DEDUP_SYSTEM_PROMPT, RELEVANCE_SYSTEM_PROMPT,
    SIGNOFF, SYNTHESIS_PROMPT, SYNTHESIS_SYSTEM_PROMPT,
};
