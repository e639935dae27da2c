//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use devpilot::transport::classify_response;
use devpilot::{Analyzer, HistoryStore, Transport, TransportError};
use serde_json::json;

/// One call observed by [`MockTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub prompt: String,
    pub model: String,
    pub api_key: String,
}

/// What the mock answers with
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, String),
    Fail(TransportError),
}

/// Transport double that replays scripted replies in order and counts calls.
/// The last reply repeats once the script runs out.
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
    recorded: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            recorded: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Every call returns 200 with `body`
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(vec![Reply::Status(200, body.into())])
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::new(vec![Reply::Status(status, body.into())])
    }

    pub fn failing(error: TransportError) -> Self {
        Self::new(vec![Reply::Fail(error)])
    }

    /// Sleep before answering, to keep requests in flight
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.recorded.lock().unwrap().clone()
    }

    fn next_reply(&self) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies.front().cloned().expect("MockTransport needs at least one reply")
        }
    }
}

impl Transport for MockTransport {
    fn send(&self, prompt: &str, model: &str, api_key: &str) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recorded.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        });
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        match self.next_reply() {
            Reply::Status(status, body) => classify_response(status, body),
            Reply::Fail(error) => Err(error),
        }
    }
}

/// Analyzer over a mock transport with a fresh history store
pub fn analyzer_with(transport: MockTransport, api_key: Option<&str>) -> Arc<Analyzer<MockTransport>> {
    Arc::new(Analyzer::new(transport, Arc::new(HistoryStore::new()), api_key.map(str::to_string)))
}

/// Builder for chat-completion response bodies
pub struct ChatResponseBuilder {
    id: String,
    model: String,
    content: String,
    with_usage: bool,
}

impl ChatResponseBuilder {
    pub fn new(content: &str) -> Self {
        Self {
            id: "gen-123".to_string(),
            model: "openai/gpt-4o-mini".to_string(),
            content: content.to_string(),
            with_usage: false,
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Append a usage block after the choices
    pub fn with_usage(mut self) -> Self {
        self.with_usage = true;
        self
    }

    /// Serialize to the JSON body the API would return
    pub fn to_json(&self) -> String {
        let mut body = json!({
            "id": self.id,
            "provider": "OpenAI",
            "model": self.model,
            "object": "chat.completion",
            "created": 1762076480,
            "choices": [{
                "index": 0,
                "finish_reason": "stop",
                "message": {"role": "assistant", "content": self.content}
            }]
        });
        if self.with_usage {
            body["usage"] = json!({"prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160});
        }
        body.to_string()
    }
}
