//! Pure Anthropic Messages API client
//!
//! A clean, minimal client for the Anthropic API with no domain-specific logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use anthropic_client::{AnthropicClient, MessageRequest, Message, models};
//!
//! let client = AnthropicClient::from_env()?;
//!
//! let response = client
//!     .create_message(&MessageRequest::new(models::CLAUDE_HAIKU_4_5, 4000)
//!         .system("You are a headline editor.")
//!         .temperature(0.0)
//!         .message(Message::user("Rewrite this headline: ...")))
//!     .await?;
//!
//! println!("{}", response.text());
//! ```

pub mod error;
pub mod types;

pub use error::{AnthropicError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// API version header value required by the Messages endpoint.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Pure Anthropic API client.
#[derive(Clone)]
pub struct AnthropicClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    /// Create a new Anthropic client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.anthropic.com".to_string(),
        }
    }

    /// Create from environment variable `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| AnthropicError::Config("ANTHROPIC_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, gateways, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a message.
    ///
    /// Sends the request to the Messages endpoint and returns the model's
    /// content blocks plus usage statistics.
    pub async fn create_message(&self, request: &MessageRequest) -> Result<MessageResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Anthropic request failed");
                AnthropicError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Anthropic API error");
            return Err(AnthropicError::Api(format!(
                "Anthropic API error: {}",
                error_text
            )));
        }

        let raw: types::MessageResponseRaw = response
            .json()
            .await
            .map_err(|e| AnthropicError::Parse(e.to_string()))?;

        if raw.content.is_empty() {
            return Err(AnthropicError::Api("No content from Anthropic".into()));
        }

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            stop_reason = ?raw.stop_reason,
            "Anthropic message created"
        );

        Ok(MessageResponse {
            content: raw.content,
            usage: raw.usage,
            stop_reason: raw.stop_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = AnthropicClient::new("sk-ant-test")
            .with_base_url("https://custom.gateway.com");

        assert_eq!(client.api_key, "sk-ant-test");
        assert_eq!(client.base_url, "https://custom.gateway.com");
    }

    #[test]
    fn test_from_env_missing_key() {
        std::env::remove_var("ANTHROPIC_API_KEY");
        let result = AnthropicClient::from_env();
        assert!(matches!(result, Err(AnthropicError::Config(_))));
    }
}
