//! LLM completion client
//!
//! This module provides the chat-completions client used for
//! knowledge-base formatting, QA generation, assistant test sessions,
//! and answer grading.

mod http;
mod types;

pub use http::{API_KEY_ENV, HttpClient};
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

use crate::error::{Error, Result};
use tracing::instrument;

/// Client for LLM text completions
#[derive(Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Create a client from an explicit API key
    pub fn with_api_key(api_key: String) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_api_key(api_key)?,
        })
    }

    /// Create a client from the `OPENAI_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http: HttpClient::from_env()?,
        })
    }

    /// Run a chat completion over an explicit conversation
    ///
    /// Returns the text of the first choice. An empty choice list or a
    /// contentless message is an unexpected-response error.
    #[instrument(skip(self, messages), level = "debug")]
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<String> {
        let request = ChatCompletionRequest {
            model,
            messages,
            temperature,
            max_tokens,
        };

        let response: ChatCompletionResponse = self.http.post("chat/completions", &request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::UnexpectedResponse("completion returned no content".to_string()))
    }

    /// Run a one-shot completion from a system prompt and a user prompt
    ///
    /// Used identically for knowledge-base reformatting and answer
    /// grading.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
    ) -> Result<String> {
        let messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_prompt),
        ];
        self.chat(&messages, model, 0.0, None).await
    }
}

#[cfg(test)]
impl Client {
    /// Point the client at a test server (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.http.set_base_url(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn completion_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("graded: correct"))
            .expect(1)
            .create_async()
            .await;

        let mut client = Client::with_api_key("test-key".to_string()).unwrap();
        client.set_base_url(server.url());

        let text = client
            .complete("you are a grader", "grade this", "gpt-4o-mini")
            .await
            .unwrap();
        assert_eq!(text, "graded: correct");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_choices_is_unexpected_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"choices\": []}")
            .create_async()
            .await;

        let mut client = Client::with_api_key("test-key".to_string()).unwrap();
        client.set_base_url(server.url());

        let result = client.complete("s", "u", "gpt-4o").await;
        assert!(matches!(result, Err(Error::UnexpectedResponse(_))));
    }
}
