//! Ingestor trait for pluggable item sources.
//!
//! How raw items are gathered (scrapers, feed pollers, vendor APIs) is
//! outside this library. The pipeline only needs a way to ask "give me
//! today's items"; this trait is that seam. The bundled
//! [`JsonArtifactStore`](crate::stores::json_file::JsonArtifactStore)
//! implements it by reading a feed artifact from disk.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::article::RawItem;

/// Source of raw items for a pipeline run.
#[async_trait]
pub trait Ingestor: Send + Sync {
    /// Fetch the current batch of raw items.
    ///
    /// Returns [`CurationError::MissingArtifact`](crate::error::CurationError::MissingArtifact)
    /// when the source has nothing staged, so a run fails loudly instead
    /// of classifying an empty feed.
    async fn fetch(&self) -> Result<Vec<RawItem>>;
}
