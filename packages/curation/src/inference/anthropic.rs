//! Anthropic implementation of the Inference trait.
//!
//! A reference implementation over the Anthropic Messages API.
//!
//! # Example
//!
//! ```rust,ignore
//! use curation::inference::AnthropicInference;
//!
//! let inference = AnthropicInference::new("sk-ant-...")
//!     .with_model(anthropic_client::models::CLAUDE_3_HAIKU);
//! ```

use anthropic_client::{models, AnthropicClient, Message, MessageRequest};
use async_trait::async_trait;

use crate::credentials::InferenceCredentials;
use crate::error::{CurationError, Result};
use crate::traits::inference::Inference;

/// Anthropic-based inference backend.
///
/// Every call runs at temperature zero; the pipeline depends on replies
/// being as stable as the model allows.
#[derive(Clone)]
pub struct AnthropicInference {
    client: AnthropicClient,
    model: String,
    max_tokens: u32,
}

impl AnthropicInference {
    /// Create a new backend with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: AnthropicClient::new(api_key),
            model: models::CLAUDE_HAIKU_4_5.to_string(),
            max_tokens: 4096,
        }
    }

    /// Build a backend from credentials.
    pub fn from_credentials(credentials: &InferenceCredentials) -> Self {
        let mut client = AnthropicClient::new(credentials.api_key.expose());
        if let Some(url) = &credentials.base_url {
            client = client.with_base_url(url.clone());
        }
        Self {
            client,
            model: credentials.model.clone(),
            max_tokens: 4096,
        }
    }

    /// Set the model (default: claude-haiku-4-5).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the completion token budget (default: 4096).
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Inference for AnthropicInference {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = MessageRequest::new(&self.model, self.max_tokens)
            .system(system)
            .temperature(0.0)
            .message(Message::user(user));

        let response = self
            .client
            .create_message(&request)
            .await
            .map_err(|e| CurationError::Inference(Box::new(e)))?;

        Ok(response.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let inference = AnthropicInference::new("sk-ant-test");
        assert_eq!(inference.model(), models::CLAUDE_HAIKU_4_5);
        assert_eq!(inference.max_tokens, 4096);
    }

    #[test]
    fn test_from_credentials() {
        let credentials = InferenceCredentials::new("sk-ant-test", models::CLAUDE_3_HAIKU)
            .with_base_url("http://localhost:8080");
        let inference = AnthropicInference::from_credentials(&credentials).with_max_tokens(2000);

        assert_eq!(inference.model(), models::CLAUDE_3_HAIKU);
        assert_eq!(inference.max_tokens, 2000);
        assert_eq!(inference.client.base_url(), "http://localhost:8080");
    }
}
