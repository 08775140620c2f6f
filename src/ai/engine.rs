//! Analysis engine
//!
//! Each operation is the same three steps: build prompts, request a
//! completion (JSON mode except trend explanation), coerce the payload.
//! The completion client is injected so tests run against a fake.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ai::prompts::{
    PromptBuilder, ANOMALY_SYSTEM_PROMPT, FORECAST_SYSTEM_PROMPT, INSIGHT_SYSTEM_PROMPT,
    TREND_SYSTEM_PROMPT,
};
use crate::ai::schemas::{AnomalyPayload, AnomalyReportPayload, ForecastPayload, InsightReportPayload};
use crate::ai::types::{AnalysisError, AnomalyRecord, Forecast, InsightBundle};
use crate::apis::llm::{ChatMessage, ChatRequest, LlmClient, LlmError};
use crate::config::AiConfig;
use crate::logger::{self, LogTag};

/// Models sometimes fence JSON despite JSON mode
static JSON_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*([\[{].+?[\]}])\s*```").expect("Invalid JSON block regex")
});

// Low temperatures bias toward repeatable output; the completion itself
// stays non-deterministic.
const ANOMALY_TEMPERATURE: f32 = 0.2;
const INSIGHT_TEMPERATURE: f32 = 0.4;
const TREND_TEMPERATURE: f32 = 0.3;
const FORECAST_TEMPERATURE: f32 = 0.2;

/// Stateless per-request orchestrator over the completion client
pub struct AnalysisEngine {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl AnalysisEngine {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Wire up the real provider from the `[ai]` config section
    pub fn from_config(config: &AiConfig) -> Self {
        let client = crate::apis::llm::OpenAiClient::from_config(config);
        let model = client.model().to_string();
        Self::new(Arc::new(client), model)
    }

    pub fn provider_name(&self) -> &'static str {
        self.client.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Scan the financial data for anomalies
    pub async fn detect_anomalies(
        &self,
        financial_data: &Value,
    ) -> Result<Vec<AnomalyRecord>, AnalysisError> {
        let user_prompt = PromptBuilder::anomaly_prompt(financial_data);
        let content = self
            .complete(ANOMALY_SYSTEM_PROMPT, user_prompt, ANOMALY_TEMPERATURE, true)
            .await?;

        // Accept both {"anomalies": [...]} and a bare array
        let payloads: Vec<AnomalyPayload> = match parse_payload::<AnomalyReportPayload>(&content) {
            Ok(report) => report.anomalies,
            Err(object_err) => parse_payload::<Vec<AnomalyPayload>>(&content)
                .map_err(|_| object_err)?,
        };

        payloads
            .into_iter()
            .map(AnomalyPayload::into_record)
            .collect()
    }

    /// Generate insights plus an overall narrative
    pub async fn generate_insights(
        &self,
        financial_data: &Value,
        user_preferences: Option<&Value>,
    ) -> Result<InsightBundle, AnalysisError> {
        let user_prompt = PromptBuilder::insight_prompt(financial_data, user_preferences);
        let content = self
            .complete(INSIGHT_SYSTEM_PROMPT, user_prompt, INSIGHT_TEMPERATURE, true)
            .await?;

        let payload: InsightReportPayload = parse_payload(&content)?;
        Ok(payload.into_bundle())
    }

    /// Explain a metric's trend; returns plain prose
    pub async fn explain_trend(
        &self,
        metric: &str,
        data: &Value,
        timeframe: &str,
    ) -> Result<String, AnalysisError> {
        let user_prompt = PromptBuilder::trend_prompt(metric, data, timeframe);
        let content = self
            .complete(TREND_SYSTEM_PROMPT, user_prompt, TREND_TEMPERATURE, false)
            .await?;

        Ok(content.trim().to_string())
    }

    /// Project the historical series over the requested horizon
    pub async fn generate_forecast(
        &self,
        historical_data: &Value,
        forecast_period: &str,
        additional_factors: Option<&Value>,
    ) -> Result<Forecast, AnalysisError> {
        let user_prompt =
            PromptBuilder::forecast_prompt(historical_data, forecast_period, additional_factors);
        let content = self
            .complete(
                FORECAST_SYSTEM_PROMPT,
                user_prompt,
                FORECAST_TEMPERATURE,
                true,
            )
            .await?;

        let payload: ForecastPayload = parse_payload(&content)?;
        Ok(payload.into_forecast())
    }

    /// One completion round trip with the empty-content check
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: String,
        temperature: f32,
        json_mode: bool,
    ) -> Result<String, AnalysisError> {
        let mut request = ChatRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
        )
        .with_temperature(temperature);

        if json_mode {
            request = request.with_json_mode();
        }

        let response = self.client.call(request).await?;

        if response.content.trim().is_empty() {
            return Err(LlmError::EmptyResponse {
                provider: self.client.name().to_string(),
            }
            .into());
        }

        logger::debug(
            LogTag::Ai,
            &format!(
                "Completion finished: model={}, tokens={}, latency={:.0}ms",
                response.model, response.usage.total_tokens, response.latency_ms
            ),
        );

        Ok(response.content)
    }
}

/// Parse completion content, unwrapping a markdown fence if present
fn parse_payload<T: DeserializeOwned>(content: &str) -> Result<T, AnalysisError> {
    let cleaned = extract_json(content);
    serde_json::from_str(cleaned).map_err(|e| AnalysisError::MalformedJson(e.to_string()))
}

fn extract_json(content: &str) -> &str {
    if let Some(cap) = JSON_BLOCK_RE.captures(content) {
        if let Some(inner) = cap.get(1) {
            return inner.as_str();
        }
    }
    content.trim()
}
