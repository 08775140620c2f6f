//! Chat-completion provider clients
//!
//! A unified [`LlmClient`] trait over provider-specific HTTP clients.
//! The trait is the injection seam: the analysis engine takes an
//! `Arc<dyn LlmClient>`, so tests substitute a fake without touching
//! process environment.

pub mod openai;
pub mod types;

pub use self::openai::OpenAiClient;
pub use self::types::{
    ChatMessage, ChatRequest, ChatResponse, LlmError, MessageRole, ResponseFormat, Usage,
};

use async_trait::async_trait;

use crate::apis::stats::ApiStats;

/// Provider-agnostic chat-completion client
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Provider identifier ("openai", "mock", ...)
    fn name(&self) -> &'static str;

    /// Execute one completion request
    async fn call(&self, request: ChatRequest) -> Result<ChatResponse, LlmError>;

    /// Usage counters for this client
    async fn get_stats(&self) -> ApiStats;
}
