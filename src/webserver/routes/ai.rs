//! AI analysis API routes
//!
//! The four analysis endpoints plus the provider health check. Required
//! fields are checked before the engine is touched, so a bad request never
//! costs a provider call. Downstream failures collapse to a generic 500;
//! the detail goes to the server log only.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logger::{self, LogTag};
use crate::webserver::state::AppState;
use crate::webserver::utils::{error_response, missing_field_response, success_response};

// ============================================================================
// ROUTES
// ============================================================================

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/anomalies", post(detect_anomalies))
        .route("/insights", post(generate_insights))
        .route("/explain-trend", post(explain_trend))
        .route("/forecast", post(generate_forecast))
        .route("/health", get(ai_health))
}

/// Capabilities reported by the health endpoint
const AI_SERVICES: [&str; 4] = ["anomalies", "insights", "explain-trend", "forecast"];

// ============================================================================
// REQUEST TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyDetectionRequest {
    pub financial_data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightGenerationRequest {
    pub financial_data: Option<Value>,
    pub user_preferences: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct TrendExplanationRequest {
    pub metric: Option<String>,
    pub data: Option<Value>,
    pub timeframe: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub historical_data: Option<Value>,
    pub forecast_period: Option<String>,
    pub additional_factors: Option<Value>,
}

// ============================================================================
// RESPONSE TYPES
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TrendExplanationResponse {
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub forecast: crate::ai::Forecast,
}

#[derive(Debug, Serialize)]
pub struct AiHealthResponse {
    pub status: String,
    pub model: String,
    pub services: Vec<&'static str>,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /api/ai/anomalies
async fn detect_anomalies(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnomalyDetectionRequest>,
) -> Response {
    let Some(financial_data) = req.financial_data else {
        return missing_field_response("financialData");
    };

    match state.engine.detect_anomalies(&financial_data).await {
        Ok(anomalies) => success_response(anomalies),
        Err(e) => {
            logger::error(LogTag::Ai, &format!("Anomaly detection failed: {}", e));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Anomaly detection failed")
        }
    }
}

/// POST /api/ai/insights
async fn generate_insights(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InsightGenerationRequest>,
) -> Response {
    let Some(financial_data) = req.financial_data else {
        return missing_field_response("financialData");
    };

    match state
        .engine
        .generate_insights(&financial_data, req.user_preferences.as_ref())
        .await
    {
        Ok(bundle) => success_response(bundle),
        Err(e) => {
            logger::error(LogTag::Ai, &format!("Insight generation failed: {}", e));
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Insight generation failed",
            )
        }
    }
}

/// POST /api/ai/explain-trend
async fn explain_trend(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TrendExplanationRequest>,
) -> Response {
    let Some(metric) = req.metric else {
        return missing_field_response("metric");
    };
    let Some(data) = req.data else {
        return missing_field_response("data");
    };
    let Some(timeframe) = req.timeframe else {
        return missing_field_response("timeframe");
    };

    match state.engine.explain_trend(&metric, &data, &timeframe).await {
        Ok(explanation) => success_response(TrendExplanationResponse { explanation }),
        Err(e) => {
            logger::error(LogTag::Ai, &format!("Trend explanation failed: {}", e));
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Trend explanation failed",
            )
        }
    }
}

/// POST /api/ai/forecast
async fn generate_forecast(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ForecastRequest>,
) -> Response {
    let Some(historical_data) = req.historical_data else {
        return missing_field_response("historicalData");
    };
    let Some(forecast_period) = req.forecast_period else {
        return missing_field_response("forecastPeriod");
    };

    match state
        .engine
        .generate_forecast(
            &historical_data,
            &forecast_period,
            req.additional_factors.as_ref(),
        )
        .await
    {
        Ok(forecast) => success_response(ForecastResponse { forecast }),
        Err(e) => {
            logger::error(LogTag::Ai, &format!("Forecast generation failed: {}", e));
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Forecast generation failed",
            )
        }
    }
}

/// GET /api/ai/health
///
/// Only checks that a credential is configured; no connectivity probe.
async fn ai_health(State(state): State<Arc<AppState>>) -> Response {
    let configured = state.config.ai.openai.resolved_api_key().is_some();
    let model = state.engine.model().to_string();

    if !configured {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(AiHealthResponse {
                status: "unavailable".to_string(),
                model,
                services: vec![],
            }),
        )
            .into_response();
    }

    success_response(AiHealthResponse {
        status: "available".to_string(),
        model,
        services: AI_SERVICES.to_vec(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::ai::AnalysisEngine;
    use crate::apis::llm::LlmError;
    use crate::config::Config;
    use crate::store::InMemoryStore;
    use crate::test_support::MockLlmClient;
    use crate::webserver::routes::create_router;

    fn test_config() -> Config {
        let mut config = Config::default();
        // point at a variable that is never set so health reflects the
        // config key alone
        config.ai.openai.api_key_env = "FINSIGHT_TEST_UNSET_KEY".to_string();
        config
    }

    fn test_app(client: Arc<MockLlmClient>, config: Config) -> axum::Router {
        let engine = Arc::new(AnalysisEngine::new(client, "mock-model"));
        let store = Arc::new(InMemoryStore::seeded());
        let state = Arc::new(crate::webserver::state::AppState::new(
            config, engine, store,
        ));
        create_router(state)
    }

    async fn send_json(
        app: axum::Router,
        method: &str,
        uri: &str,
        body: Value,
    ) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn send_get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    const ANOMALY_COMPLETION: &str = r#"{
        "anomalies": [{
            "title": "Expense spike",
            "description": "Cloud spend doubled in June",
            "category": "variance",
            "severity": "high",
            "affectedMetric": "expenses",
            "detectedAt": "2026-06-20T10:00:00Z",
            "updatedAt": "2026-06-20T10:00:00Z",
            "impact": {"description": "Overrun", "magnitude": 43000.0, "monetary": true},
            "affectedPeriods": ["2026-06"]
        }]
    }"#;

    #[tokio::test]
    async fn test_anomalies_missing_field_is_400_and_no_provider_call() {
        let client = MockLlmClient::returning(ANOMALY_COMPLETION);
        let app = test_app(client.clone(), test_config());

        let (status, body) = send_json(app, "POST", "/api/ai/anomalies", json!({})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "financialData is required");
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_insights_missing_field_is_400_and_no_provider_call() {
        let client = MockLlmClient::returning("{}");
        let app = test_app(client.clone(), test_config());

        let (status, body) = send_json(
            app,
            "POST",
            "/api/ai/insights",
            json!({"userPreferences": {"focus": "growth"}}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "financialData is required");
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_anomalies_success_returns_record_array() {
        let client = MockLlmClient::returning(ANOMALY_COMPLETION);
        let app = test_app(client.clone(), test_config());

        let (status, body) = send_json(
            app,
            "POST",
            "/api/ai/anomalies",
            json!({"financialData": {"expenses": [21000, 22000, 43000]}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let anomalies = body.as_array().expect("array of anomaly records");
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0]["category"], "variance");
        assert_eq!(anomalies[0]["detectedAt"], "2026-06-20T10:00:00Z");
        // the caller's data reached the provider verbatim
        let request = client.last_request().unwrap();
        assert!(request.messages[1].content.contains("43000"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_generic_500() {
        let client = MockLlmClient::failing(LlmError::AuthError {
            provider: "mock".to_string(),
            message: "Invalid API key sk-secret".to_string(),
        });
        let app = test_app(client, test_config());

        let (status, body) = send_json(
            app,
            "POST",
            "/api/ai/anomalies",
            json!({"financialData": {}}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Anomaly detection failed");
        // no internal detail leaks
        assert!(!body.to_string().contains("sk-secret"));
        assert!(!body.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_empty_completion_is_500() {
        let client = MockLlmClient::returning("");
        let app = test_app(client, test_config());

        let (status, body) = send_json(
            app,
            "POST",
            "/api/ai/insights",
            json!({"financialData": {"revenue": 1}}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Insight generation failed");
    }

    #[tokio::test]
    async fn test_explain_trend_happy_path() {
        let client = MockLlmClient::returning("Revenue grew steadily.");
        let app = test_app(client, test_config());

        let (status, body) = send_json(
            app,
            "POST",
            "/api/ai/explain-trend",
            json!({"metric": "revenue", "data": [1, 2, 3], "timeframe": "Q1"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["explanation"], "Revenue grew steadily.");
    }

    #[tokio::test]
    async fn test_explain_trend_validates_each_field() {
        let client = MockLlmClient::returning("x");
        let app = test_app(client.clone(), test_config());

        let (status, body) = send_json(
            app.clone(),
            "POST",
            "/api/ai/explain-trend",
            json!({"data": [1], "timeframe": "Q1"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "metric is required");

        let (status, body) = send_json(
            app,
            "POST",
            "/api/ai/explain-trend",
            json!({"metric": "revenue", "data": [1]}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "timeframe is required");
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_forecast_requires_period() {
        let client = MockLlmClient::returning("{}");
        let app = test_app(client.clone(), test_config());

        let (status, body) = send_json(
            app,
            "POST",
            "/api/ai/forecast",
            json!({"historicalData": [100, 110]}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "forecastPeriod is required");
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_forecast_success_is_wrapped() {
        let client = MockLlmClient::returning(
            r#"{
                "periods": [{"period": "2026-09", "value": 120000.0}],
                "assumptions": [],
                "risks": [],
                "methodology": "Trend extrapolation",
                "confidenceScore": 0.7
            }"#,
        );
        let app = test_app(client, test_config());

        let (status, body) = send_json(
            app,
            "POST",
            "/api/ai/forecast",
            json!({"historicalData": [100000, 110000], "forecastPeriod": "3 months"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["forecast"]["methodology"], "Trend extrapolation");
        assert_eq!(body["forecast"]["confidenceScore"], 0.7);
    }

    #[tokio::test]
    async fn test_health_unavailable_without_credential() {
        let client = MockLlmClient::returning("{}");
        let app = test_app(client, test_config());

        let (status, body) = send_get(app, "/api/ai/health").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unavailable");
    }

    #[tokio::test]
    async fn test_health_available_with_dummy_credential() {
        let client = MockLlmClient::returning("{}");
        let mut config = test_config();
        config.ai.openai.api_key = "sk-dummy-not-validated".to_string();
        let app = test_app(client, config);

        let (status, body) = send_get(app, "/api/ai/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "available");
        assert_eq!(body["model"], "mock-model");
        assert_eq!(
            body["services"],
            json!(["anomalies", "insights", "explain-trend", "forecast"])
        );
    }
}
