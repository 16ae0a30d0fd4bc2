//! Request and response types for the chat-completions API

use serde::{Deserialize, Serialize};

/// A single message in a chat conversation
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Message role: `system`, `user`, or `assistant`
    pub role: String,

    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for a chat completion
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    /// Model name
    pub model: &'a str,

    /// Conversation so far
    pub messages: &'a [ChatMessage],

    /// Sampling temperature
    pub temperature: f32,

    /// Completion token cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Response body of a chat completion
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// Generated completions
    pub choices: Vec<Choice>,
}

/// One generated completion
#[derive(Debug, Deserialize)]
pub struct Choice {
    /// The generated message
    pub message: ResponseMessage,
}

/// Message payload of a completion choice
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    /// Generated text, absent when the model returned nothing
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(ChatMessage::system("s").role, "system");
        assert_eq!(ChatMessage::user("u").role, "user");
        assert_eq!(ChatMessage::assistant("a").role, "assistant");
    }

    #[test]
    fn test_request_serialization_skips_absent_max_tokens() {
        let messages = vec![ChatMessage::user("hi")];
        let request = ChatCompletionRequest {
            model: "gpt-4o",
            messages: &messages,
            temperature: 0.0,
            max_tokens: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("max_tokens"));
        assert!(json.contains("\"model\":\"gpt-4o\""));
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("hello")
        );
    }
}
