/// Analysis domain records
///
/// These are produced by coercing the completion payloads in
/// [`super::schemas`]; they exist only for the request/response cycle and
/// are never persisted. All JSON field names are camelCase to match the
/// dashboard client.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::apis::llm::LlmError;

// ============================================================================
// ANOMALIES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyCategory {
    Variance,
    Trend,
    Outlier,
    Pattern,
    Seasonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// Lifecycle status as shown in the dashboard
///
/// Transitions happen client-side only; the server never stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyStatus {
    Detected,
    Investigating,
    Resolved,
    Ignored,
}

impl Default for AnomalyStatus {
    fn default() -> Self {
        AnomalyStatus::Detected
    }
}

/// Metric family an anomaly is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AffectedMetric {
    Revenue,
    Expenses,
    Profit,
    CashFlow,
    Budget,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyImpact {
    pub description: String,
    /// Size of the deviation (percentage points or absolute, see `monetary`)
    pub magnitude: f64,
    /// Whether `magnitude` is a monetary amount
    pub monetary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: AnomalyCategory,
    pub severity: Severity,
    pub status: AnomalyStatus,
    pub affected_metric: AffectedMetric,
    pub detected_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub impact: AnomalyImpact,
    pub affected_periods: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub possible_causes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_actions: Vec<String>,
}

// ============================================================================
// INSIGHTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Strategic,
    Operational,
    Financial,
    Market,
    Customer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: InsightCategory,
    pub importance: Severity,
    pub related_metrics: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action_items: Vec<String>,
    /// Confidence in [0, 1]
    pub confidence_score: f64,
}

/// Insight endpoint response: individual insights plus an overall narrative
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightBundle {
    pub insights: Vec<InsightRecord>,
    pub analysis: String,
}

// ============================================================================
// FORECAST
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    pub period: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub periods: Vec<ForecastPeriod>,
    pub assumptions: Vec<String>,
    pub risks: Vec<String>,
    pub methodology: String,
    /// Confidence in [0, 1]
    pub confidence_score: f64,
}

// ============================================================================
// ERRORS
// ============================================================================

/// Analysis engine failures
///
/// All of these collapse to a generic 500 at the route boundary; the
/// variants exist so the server log can tell them apart.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error("completion was not valid JSON: {0}")]
    MalformedJson(String),

    #[error("invalid timestamp '{value}': {message}")]
    InvalidTimestamp { value: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&AnomalyCategory::Seasonal).unwrap(),
            "\"seasonal\""
        );
        assert_eq!(
            serde_json::to_string(&AffectedMetric::CashFlow).unwrap(),
            "\"cashFlow\""
        );
        assert_eq!(
            serde_json::to_string(&AnomalyStatus::Investigating).unwrap(),
            "\"investigating\""
        );
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = InsightRecord {
            id: "ins-1".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            category: InsightCategory::Financial,
            importance: Severity::High,
            related_metrics: vec!["revenue".to_string()],
            action_items: vec![],
            confidence_score: 0.8,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("relatedMetrics").is_some());
        assert!(json.get("confidenceScore").is_some());
        assert!(json.get("related_metrics").is_none());
    }

    #[test]
    fn test_empty_response_error_message() {
        let err: AnalysisError = LlmError::EmptyResponse {
            provider: "openai".to_string(),
        }
        .into();
        assert!(err.to_string().contains("empty response"));
    }
}
