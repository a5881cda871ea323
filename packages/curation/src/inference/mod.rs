//! Inference implementations for the curation library.
//!
//! This module provides the reference implementation of the `Inference`
//! trait. Users can use it directly or implement their own.

#[cfg(feature = "anthropic")]
mod anthropic;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicInference;
