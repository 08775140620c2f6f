/// Unified chat-completion types
///
/// Provider-agnostic request/response shapes. The provider client
/// translates these to and from its wire format.
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// MESSAGE TYPES
// ============================================================================

/// Chat message with role and content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

// ============================================================================
// REQUEST TYPES
// ============================================================================

/// Chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier (empty = client default)
    pub model: String,

    pub messages: Vec<ChatMessage>,

    /// Sampling temperature (0.0-2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Response format hint (JSON mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
            response_format: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Ask the provider to emit a single JSON object
    pub fn with_json_mode(mut self) -> Self {
        self.response_format = Some(ResponseFormat::JsonObject);
        self
    }
}

/// Completion output format hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    Text,
    JsonObject,
}

impl ResponseFormat {
    /// Wire name used by OpenAI-compatible APIs
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            ResponseFormat::Text => "text",
            ResponseFormat::JsonObject => "json_object",
        }
    }
}

// ============================================================================
// RESPONSE TYPES
// ============================================================================

/// Chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated text content
    pub content: String,

    pub usage: Usage,

    /// Reason the completion finished ("stop", "length", ...)
    pub finish_reason: String,

    /// Model that produced the completion
    pub model: String,

    pub latency_ms: f64,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Provider call errors
///
/// Kinds stay distinct here even though the HTTP boundary collapses them
/// all into a generic 500.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LlmError {
    /// Rate limited by the provider
    RateLimited {
        provider: String,
        retry_after_ms: Option<u64>,
    },

    /// Request timed out
    Timeout { provider: String, timeout_ms: u64 },

    /// Response had no usable choice
    InvalidResponse { provider: String, message: String },

    /// Completion arrived with empty content
    EmptyResponse { provider: String },

    /// Authentication failure
    AuthError { provider: String, message: String },

    /// Transport-level failure
    NetworkError { provider: String, message: String },

    /// Response body could not be decoded
    ParseError { provider: String, message: String },

    /// Any other non-success status
    ApiError {
        provider: String,
        status_code: u16,
        message: String,
    },
}

impl LlmError {
    /// Whether a retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::RateLimited { .. } | LlmError::Timeout { .. } => true,
            LlmError::NetworkError { .. } => true,
            LlmError::ApiError { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::RateLimited {
                provider,
                retry_after_ms,
            } => {
                if let Some(ms) = retry_after_ms {
                    write!(f, "[{}] Rate limited (retry after {}ms)", provider, ms)
                } else {
                    write!(f, "[{}] Rate limited", provider)
                }
            }
            LlmError::Timeout {
                provider,
                timeout_ms,
            } => write!(f, "[{}] Request timeout ({}ms)", provider, timeout_ms),
            LlmError::InvalidResponse { provider, message } => {
                write!(f, "[{}] Invalid response: {}", provider, message)
            }
            LlmError::EmptyResponse { provider } => {
                write!(f, "{} returned empty response", provider)
            }
            LlmError::AuthError { provider, message } => {
                write!(f, "[{}] Auth error: {}", provider, message)
            }
            LlmError::NetworkError { provider, message } => {
                write!(f, "[{}] Network error: {}", provider, message)
            }
            LlmError::ParseError { provider, message } => {
                write!(f, "[{}] Parse error: {}", provider, message)
            }
            LlmError::ApiError {
                provider,
                status_code,
                message,
            } => write!(f, "[{}] API error {}: {}", provider, status_code, message),
        }
    }
}

impl std::error::Error for LlmError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let request = ChatRequest::new(
            "gpt-4o-mini",
            vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
        )
        .with_temperature(0.2)
        .with_max_tokens(256)
        .with_json_mode();

        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.max_tokens, Some(256));
        assert_eq!(request.response_format, Some(ResponseFormat::JsonObject));
    }

    #[test]
    fn test_empty_response_message() {
        let err = LlmError::EmptyResponse {
            provider: "openai".to_string(),
        };
        assert!(err.to_string().contains("empty response"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(LlmError::Timeout {
            provider: "openai".to_string(),
            timeout_ms: 30_000,
        }
        .is_retryable());
        assert!(LlmError::ApiError {
            provider: "openai".to_string(),
            status_code: 503,
            message: String::new(),
        }
        .is_retryable());
        assert!(!LlmError::AuthError {
            provider: "openai".to_string(),
            message: "bad key".to_string(),
        }
        .is_retryable());
        assert!(!LlmError::EmptyResponse {
            provider: "openai".to_string(),
        }
        .is_retryable());
    }
}
