//! HTTP transport for the chat-completion API.
//!
//! [`Transport`] is the seam the pipeline talks to. [`OpenRouterClient`] is the
//! real implementation: one blocking POST per call, no retries. Status handling
//! lives in [`classify_response`] so test doubles can reuse it.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Ceiling for a single request, connection included
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("API request failed. Status: {status} Body: {body}")]
    Api { status: u16, body: String },
}

/// Sends a prompt to a chat-completion endpoint and returns the raw body
pub trait Transport: Send + Sync {
    fn send(&self, prompt: &str, model: &str, api_key: &str) -> Result<String, TransportError>;
}

/// Map an HTTP status and body to the transport contract: 200 yields the body,
/// anything else is an API error carrying both verbatim.
pub fn classify_response(status: u16, body: String) -> Result<String, TransportError> {
    if status == 200 { Ok(body) } else { Err(TransportError::Api { status, body }) }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// Single user-role message carrying the whole prompt
    pub fn user(model: &'a str, prompt: &'a str) -> Self {
        Self { model, messages: vec![ChatMessage { role: "user", content: prompt }] }
    }
}

/// Blocking client for OpenRouter's chat-completion endpoint
pub struct OpenRouterClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl OpenRouterClient {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_endpoint(OPENROUTER_API_URL, REQUEST_TIMEOUT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, endpoint: endpoint.into(), timeout })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

impl Transport for OpenRouterClient {
    fn send(&self, prompt: &str, model: &str, api_key: &str) -> Result<String, TransportError> {
        debug!(endpoint = %self.endpoint, model, prompt_len = prompt.len(), "sending chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .bearer_auth(api_key)
            .json(&ChatRequest::user(model, prompt))
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| self.map_send_error(e))?;
        debug!(status, body_len = body.len(), "chat completion response received");

        classify_response(status, body)
    }
}
