//! Inference trait for LLM operations.
//!
//! Every pipeline stage that talks to a model goes through this one
//! method. Stages own their prompts and parse their own responses, so
//! the trait stays a plain text-in, text-out completion call.

use async_trait::async_trait;

use crate::error::Result;

/// Inference backend for the pipeline.
///
/// Implementations wrap a specific provider (the bundled one wraps the
/// Anthropic Messages API) or, in tests, a scripted mock.
#[async_trait]
pub trait Inference: Send + Sync {
    /// Run one completion with a system prompt and a user payload.
    ///
    /// Returns the raw text of the model's reply. Callers are
    /// responsible for extracting any structured content from it.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}
