//! LLM-Driven News Curation Library
//!
//! Turns a noisy raw news feed into a classified, deduplicated corpus
//! and writes personalized digests from it.
//!
//! # Design Philosophy
//!
//! **"The model proposes, the pipeline disposes"**
//!
//! - Stages own their prompts and parse their own replies
//! - Model failures degrade output instead of crashing the run
//! - Ids, scores, and tag counts are normalized after every reply
//! - Storage, ingestion, and inference are pluggable seams
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use curation::{MemoryStore, Orchestrator, PipelineConfig};
//! use curation::testing::MockInference;
//!
//! let store = Arc::new(MemoryStore::new().with_raw_items(items));
//! let orchestrator = Orchestrator::new(
//!     store.clone(),
//!     Arc::new(MockInference::new()),
//!     store.clone(),
//!     store,
//!     PipelineConfig::default(),
//! );
//!
//! let summary = orchestrator.run().await?;
//! println!("final corpus: {} articles", summary.final_len);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (Inference, stores, Ingestor)
//! - [`types`] - Domain data types
//! - [`pipeline`] - Classification, dedup, digest, and the orchestrator
//! - [`stores`] - Storage implementations (MemoryStore, JSON files, SQLite)
//! - [`taxonomy`] - The tag taxonomies articles are classified into
//! - [`credentials`] - Secret-safe inference credentials
//! - [`testing`] - Mock implementations for testing

pub mod credentials;
pub mod error;
pub mod inference;
pub mod pipeline;
pub mod stores;
pub mod taxonomy;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{CurationError, Result};
pub use traits::{
    inference::Inference,
    ingestor::Ingestor,
    store::{CorpusStore, SubscriberStore},
};
pub use types::{
    article::{ClassifiedArticle, Corpus, RawFeed, RawItem},
    config::{ClassifierConfig, PipelineConfig},
    subscriber::{subscriber_id, Subscriber, SubscriberProfile},
};

// Re-export pipeline components
pub use pipeline::{
    // Stage functions
    classify_feed, escape_markup, resolve_duplicates, synthesize_digest,
    // Stage outcomes
    ClassifyResult, DedupResult,
    // Reply decoding
    decode_response, extract_json_object, Decoded,
    // Orchestration
    Orchestrator, RunSummary,
};

// Re-export credentials
pub use credentials::{InferenceCredentials, SecretString};

// Re-export stores
pub use stores::{JsonArtifactStore, MemoryStore};

#[cfg(feature = "sqlite")]
pub use stores::SqliteSubscriberStore;

#[cfg(feature = "anthropic")]
pub use inference::AnthropicInference;

// Re-export testing utilities
pub use testing::MockInference;
