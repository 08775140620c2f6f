/// OpenAI API client (raw HTTP via reqwest)
///
/// Endpoints:
/// - POST https://api.openai.com/v1/chat/completions
///
/// Features:
/// - JSON mode via response_format
/// - Bearer token authentication
/// - Per-request timeout, bounded retry with backoff on transient failures
pub mod types;

pub use self::types::{
    OpenAiChoice, OpenAiMessage, OpenAiRequest, OpenAiResponse, OpenAiResponseFormat,
    OpenAiResponseMessage, OpenAiUsage,
};

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;

use crate::apis::client::{RateLimiter, RetryPolicy};
use crate::apis::llm::{ChatRequest, ChatResponse, LlmClient, LlmError, MessageRole, Usage};
use crate::apis::stats::{ApiStats, ApiStatsTracker};
use crate::config::AiConfig;
use crate::logger::{self, LogTag};

// ============================================================================
// API CONFIGURATION
// ============================================================================

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const ENDPOINT_CHAT: &str = "/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const PROVIDER: &str = "openai";

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

/// OpenAI chat-completion client
pub struct OpenAiClient {
    api_key: String,
    client: Client,
    model: String,
    timeout: Duration,
    rate_limiter: RateLimiter,
    retry_policy: RetryPolicy,
    stats: Arc<ApiStatsTracker>,
}

impl OpenAiClient {
    /// Create a client from explicit settings
    ///
    /// The key may be empty: the call will then fail with an auth error from
    /// the provider, which is exactly how a missing credential is surfaced
    /// (the health endpoint reports it up front, the engine does not).
    pub fn new(
        api_key: String,
        model: Option<String>,
        rate_limit_per_minute: usize,
        timeout: Duration,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            api_key,
            client: Client::new(),
            model: model
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
            rate_limiter: RateLimiter::new(rate_limit_per_minute),
            retry_policy,
            stats: Arc::new(ApiStatsTracker::new()),
        }
    }

    /// Create a client from the `[ai]` config section
    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(
            config.openai.resolved_api_key().unwrap_or_default(),
            Some(config.openai.model.clone()),
            config.openai.rate_limit_per_minute as usize,
            Duration::from_secs(config.request_timeout_seconds),
            RetryPolicy::new(
                config.max_retries,
                Duration::from_millis(config.retry_backoff_ms),
            ),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Translate the unified request into the OpenAI wire format
    fn build_wire_request(&self, request: &ChatRequest) -> OpenAiRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| OpenAiMessage {
                role: match msg.role {
                    MessageRole::System => "system".to_string(),
                    MessageRole::User => "user".to_string(),
                    MessageRole::Assistant => "assistant".to_string(),
                },
                content: msg.content.clone(),
            })
            .collect();

        OpenAiRequest {
            model: if request.model.is_empty() {
                self.model.clone()
            } else {
                request.model.clone()
            },
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.response_format.map(|rf| OpenAiResponseFormat {
                type_: rf.as_wire_str().to_string(),
            }),
        }
    }

    /// Translate the OpenAI response into the unified shape
    fn parse_wire_response(
        &self,
        response: OpenAiResponse,
        latency_ms: f64,
    ) -> Result<ChatResponse, LlmError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                message: "No choices in response".to_string(),
            })?;

        Ok(ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            usage: Usage::new(
                response.usage.prompt_tokens,
                response.usage.completion_tokens,
            ),
            finish_reason: choice.finish_reason.unwrap_or_else(|| "stop".to_string()),
            model: response.model,
            latency_ms,
        })
    }

    /// Send one HTTP request, no retries
    async fn execute_once(
        &self,
        request: &OpenAiRequest,
    ) -> Result<(OpenAiResponse, f64), LlmError> {
        let guard = self
            .rate_limiter
            .acquire()
            .await
            .map_err(|e| LlmError::NetworkError {
                provider: PROVIDER.to_string(),
                message: format!("Rate limiter error: {}", e),
            })?;

        let url = format!("{}{}", OPENAI_BASE_URL, ENDPOINT_CHAT);

        logger::debug(
            LogTag::Api,
            &format!("[OPENAI] Calling chat completions: model={}", request.model),
        );

        let start = Instant::now();
        let response_result = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .timeout(self.timeout)
            .send()
            .await;

        drop(guard);
        let elapsed = start.elapsed().as_millis() as f64;

        let response = response_result.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout {
                    provider: PROVIDER.to_string(),
                    timeout_ms: self.timeout.as_millis() as u64,
                }
            } else {
                LlmError::NetworkError {
                    provider: PROVIDER.to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })?;

        let status = response.status();

        if !status.is_success() {
            // retry-after must be read before the body is consumed
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(|s| s * 1000);

            let error_body = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                401 => LlmError::AuthError {
                    provider: PROVIDER.to_string(),
                    message: "Invalid API key".to_string(),
                },
                429 => LlmError::RateLimited {
                    provider: PROVIDER.to_string(),
                    retry_after_ms: retry_after,
                },
                _ => LlmError::ApiError {
                    provider: PROVIDER.to_string(),
                    status_code: status.as_u16(),
                    message: error_body,
                },
            });
        }

        let wire_response =
            response
                .json::<OpenAiResponse>()
                .await
                .map_err(|e| LlmError::ParseError {
                    provider: PROVIDER.to_string(),
                    message: format!("Failed to parse response: {}", e),
                })?;

        Ok((wire_response, elapsed))
    }

    /// Execute with the retry policy applied to transient failures
    async fn execute_with_retries(
        &self,
        request: &OpenAiRequest,
    ) -> Result<(OpenAiResponse, f64), LlmError> {
        let mut attempt = 0u32;
        loop {
            match self.execute_once(request).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.retry_policy.max_retries => {
                    attempt += 1;
                    let delay = match &e {
                        LlmError::RateLimited {
                            retry_after_ms: Some(ms),
                            ..
                        } => Duration::from_millis(*ms),
                        _ => self.retry_policy.backoff_delay(attempt),
                    };
                    logger::warning(
                        LogTag::Api,
                        &format!(
                            "[OPENAI] Attempt {} failed ({}), retrying in {:?}",
                            attempt, e, delay
                        ),
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn call(&self, request: ChatRequest) -> Result<ChatResponse, LlmError> {
        let wire_request = self.build_wire_request(&request);

        let (wire_response, latency_ms) = match self.execute_with_retries(&wire_request).await {
            Ok((resp, lat)) => {
                self.stats.record_request(true, lat).await;
                (resp, lat)
            }
            Err(e) => {
                self.stats.record_request(false, 0.0).await;
                logger::error(
                    LogTag::Api,
                    &format!("[OPENAI] Chat completion failed: {}", e),
                );
                return Err(e);
            }
        };

        self.parse_wire_response(wire_response, latency_ms)
    }

    async fn get_stats(&self) -> ApiStats {
        self.stats.get_stats().await
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::llm::ChatMessage;

    fn test_client() -> OpenAiClient {
        OpenAiClient::new(
            "sk-test-key".to_string(),
            None,
            60,
            Duration::from_secs(30),
            RetryPolicy::none(),
        )
    }

    #[test]
    fn test_default_model() {
        let client = test_client();
        assert_eq!(client.model(), DEFAULT_MODEL);

        let client = OpenAiClient::new(
            "sk-test".to_string(),
            Some("gpt-4o".to_string()),
            60,
            Duration::from_secs(30),
            RetryPolicy::none(),
        );
        assert_eq!(client.model(), "gpt-4o");
    }

    #[test]
    fn test_build_wire_request() {
        let client = test_client();

        let request = ChatRequest::new(
            "",
            vec![
                ChatMessage::system("You are a financial analyst"),
                ChatMessage::user("Analyze this"),
            ],
        )
        .with_temperature(0.2)
        .with_json_mode();

        let wire = client.build_wire_request(&request);

        assert_eq!(wire.model, DEFAULT_MODEL); // empty model falls back
        assert_eq!(wire.messages.len(), 2);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[1].role, "user");
        assert_eq!(wire.temperature, Some(0.2));
        assert_eq!(wire.response_format.unwrap().type_, "json_object");
    }

    #[test]
    fn test_parse_wire_response() {
        let client = test_client();

        let response = OpenAiResponse {
            model: "gpt-4o-mini".to_string(),
            choices: vec![OpenAiChoice {
                message: OpenAiResponseMessage {
                    content: Some("{\"ok\":true}".to_string()),
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: OpenAiUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            },
        };

        let parsed = client.parse_wire_response(response, 42.0).unwrap();
        assert_eq!(parsed.content, "{\"ok\":true}");
        assert_eq!(parsed.usage.total_tokens, 15);
        assert_eq!(parsed.finish_reason, "stop");
    }

    #[test]
    fn test_parse_wire_response_no_choices() {
        let client = test_client();

        let response = OpenAiResponse {
            model: "gpt-4o-mini".to_string(),
            choices: vec![],
            usage: OpenAiUsage::default(),
        };

        let err = client.parse_wire_response(response, 0.0).unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse { .. }));
    }
}
