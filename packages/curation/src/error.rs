//! Typed errors for the curation library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during curation operations.
#[derive(Debug, Error)]
pub enum CurationError {
    /// Required upstream artifact is absent
    #[error("missing artifact: {artifact}")]
    MissingArtifact { artifact: String },

    /// Subscriber record not found
    #[error("subscriber not found: {id}")]
    SubscriberNotFound { id: String },

    /// Inference capability unreachable or failed
    #[error("inference error: {0}")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Raw feed could not be ingested
    #[error("ingest error: {0}")]
    Ingest(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A pipeline stage failed, halting the run
    #[error("stage '{stage}' failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<CurationError>,
    },
}

/// Result type alias for curation operations.
pub type Result<T> = std::result::Result<T, CurationError>;
