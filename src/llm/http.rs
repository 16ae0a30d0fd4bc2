//! HTTP client for the chat-completions API
//!
//! Handles authentication, request formatting, and response parsing.
//! Failed calls are not retried; a failed completion surfaces to the
//! caller as a typed error.

use crate::error::{Error, Result};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default API endpoint
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// HTTP client for making requests to the completions API
#[derive(Clone)]
pub struct HttpClient {
    /// The underlying reqwest client
    client: ReqwestClient,

    /// Base URL for API requests
    base_url: String,

    /// API key for bearer authentication
    api_key: String,
}

#[cfg(test)]
impl HttpClient {
    /// Set the base URL (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }
}

impl HttpClient {
    /// Create a new HTTP client with an API key
    pub fn with_api_key(api_key: String) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        })
    }

    /// Create a new HTTP client from the `OPENAI_API_KEY` environment variable
    ///
    /// A missing key is a fatal configuration error, surfaced before any
    /// crawling or completion work begins.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            Error::Auth(format!("please set the {} environment variable", API_KEY_ENV))
        })?;
        Self::with_api_key(api_key)
    }

    /// Send a POST request with a JSON body and parse the JSON response
    #[instrument(skip(self, body), level = "debug")]
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);

        debug!("Sending POST request to {}", path);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let response_text = response.text().await.map_err(Error::Http)?;

        if status.is_success() {
            serde_json::from_str(&response_text).map_err(|e| {
                error!("Failed to parse response: {}", e);
                Error::UnexpectedResponse(format!("Failed to parse response: {}", e))
            })
        } else {
            error!("API error: {} - {}", status, response_text);

            if status == StatusCode::UNAUTHORIZED {
                Err(Error::Auth("Invalid API key or credentials".to_string()))
            } else {
                Err(Error::Api {
                    status_code: status.as_u16(),
                    message: response_text,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct TestResponse {
        message: String,
    }

    #[tokio::test]
    async fn test_post_request_success() {
        let mut server = Server::new_async().await;
        let mock_server = server
            .mock("POST", "/test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"message\": \"success\"}")
            .expect(1)
            .create_async()
            .await;

        let mut client = HttpClient::with_api_key("test-key".to_string()).unwrap();
        client.set_base_url(server.url());

        let body = serde_json::json!({"test": "data"});
        let response: TestResponse = client.post("test", &body).await.unwrap();
        assert_eq!(response.message, "success");

        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/test")
            .with_status(401)
            .with_body("unauthorized")
            .create_async()
            .await;

        let mut client = HttpClient::with_api_key("bad-key".to_string()).unwrap();
        client.set_base_url(server.url());

        let body = serde_json::json!({});
        let result: Result<TestResponse> = client.post("test", &body).await;
        assert!(matches!(result, Err(Error::Auth(_))));
    }

    #[tokio::test]
    async fn test_api_error_carries_status_and_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/test")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let mut client = HttpClient::with_api_key("test-key".to_string()).unwrap();
        client.set_base_url(server.url());

        let body = serde_json::json!({});
        let result: Result<TestResponse> = client.post("test", &body).await;
        match result {
            Err(Error::Api {
                status_code,
                message,
            }) => {
                assert_eq!(status_code, 500);
                assert_eq!(message, "internal error");
            }
            other => panic!("expected Api error, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_is_unexpected_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/test")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let mut client = HttpClient::with_api_key("test-key".to_string()).unwrap();
        client.set_base_url(server.url());

        let body = serde_json::json!({});
        let result: Result<TestResponse> = client.post("test", &body).await;
        assert!(matches!(result, Err(Error::UnexpectedResponse(_))));
    }
}
