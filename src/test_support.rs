//! Shared test doubles
//!
//! Only compiled for tests. `MockLlmClient` is the injected stand-in for
//! the completion provider: it records every request (spy) and replays a
//! canned result.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::apis::llm::{ChatRequest, ChatResponse, LlmClient, LlmError, Usage};
use crate::apis::stats::ApiStats;

pub struct MockLlmClient {
    result: Result<String, LlmError>,
    calls: Mutex<Vec<ChatRequest>>,
}

impl MockLlmClient {
    /// Client that answers every call with the given completion content
    pub fn returning(content: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(content.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Client that fails every call with the given error
    pub fn failing(error: LlmError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(error),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.calls.lock().last().cloned()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn call(&self, request: ChatRequest) -> Result<ChatResponse, LlmError> {
        self.calls.lock().push(request.clone());
        match &self.result {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                usage: Usage::new(10, 10),
                finish_reason: "stop".to_string(),
                model: request.model,
                latency_ms: 1.0,
            }),
            Err(e) => Err(e.clone()),
        }
    }

    async fn get_stats(&self) -> ApiStats {
        ApiStats::default()
    }
}
