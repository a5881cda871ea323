//! Anthropic Messages API request and response types.

use serde::{Deserialize, Serialize};

/// Known model identifiers.
pub mod models {
    /// Claude 3 Haiku, the original fast tier.
    pub const CLAUDE_3_HAIKU: &str = "claude-3-haiku-20240307";

    /// Claude Haiku 4.5, the current fast tier.
    pub const CLAUDE_HAIKU_4_5: &str = "claude-haiku-4-5-20251001";
}

/// Messages API request.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    /// Model to use (e.g., `models::CLAUDE_HAIKU_4_5`)
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// System prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Sampling temperature (0.0 to 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Conversation messages
    pub messages: Vec<Message>,
}

impl MessageRequest {
    /// Create a new request with the given model and token budget.
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            system: None,
            temperature: None,
            messages: Vec::new(),
        }
    }

    /// Set the system prompt.
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}

/// Conversation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "user" or "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Messages API response.
#[derive(Debug, Clone)]
pub struct MessageResponse {
    /// Content blocks returned by the model
    pub content: Vec<ContentBlock>,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Why generation stopped ("end_turn", "max_tokens", ...)
    pub stop_reason: Option<String>,
}

impl MessageResponse {
    /// Concatenated text of all text content blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter(|block| block.block_type == "text")
            .map(|block| block.text.as_str())
            .collect()
    }
}

/// One content block in a response.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    /// Block type ("text" for generated prose)
    #[serde(rename = "type")]
    pub block_type: String,

    /// Text payload, empty for non-text blocks
    #[serde(default)]
    pub text: String,
}

/// Raw response from the API (for internal parsing).
#[derive(Debug, Deserialize)]
pub(crate) struct MessageResponseRaw {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    pub usage: Option<Usage>,
    pub stop_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub input_tokens: u32,

    /// Tokens in the completion
    pub output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = Message::user("Hello");
        assert_eq!(user.role, "user");

        let assistant = Message::assistant("Hi there");
        assert_eq!(assistant.role, "assistant");
    }

    #[test]
    fn test_request_builder() {
        let req = MessageRequest::new(models::CLAUDE_HAIKU_4_5, 4000)
            .system("You are terse")
            .temperature(0.0)
            .message(Message::user("Hello"));

        assert_eq!(req.model, models::CLAUDE_HAIKU_4_5);
        assert_eq!(req.max_tokens, 4000);
        assert_eq!(req.temperature, Some(0.0));
        assert_eq!(req.messages.len(), 1);
    }

    #[test]
    fn test_request_omits_unset_fields() {
        let req = MessageRequest::new("m", 100).message(Message::user("x"));
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("system"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn test_response_text_concatenates_blocks() {
        let response = MessageResponse {
            content: vec![
                ContentBlock {
                    block_type: "text".to_string(),
                    text: "Hello ".to_string(),
                },
                ContentBlock {
                    block_type: "tool_use".to_string(),
                    text: String::new(),
                },
                ContentBlock {
                    block_type: "text".to_string(),
                    text: "world".to_string(),
                },
            ],
            usage: None,
            stop_reason: None,
        };

        assert_eq!(response.text(), "Hello world");
    }
}
