//! Completion payload schemas
//!
//! Serde shapes for the JSON the provider is instructed to emit, one file
//! per operation. Coercion into the domain records (timestamp parsing,
//! score clamping) happens here too.

pub mod anomaly;
pub mod forecast;
pub mod insight;

pub use anomaly::{AnomalyPayload, AnomalyReportPayload};
pub use forecast::ForecastPayload;
pub use insight::{InsightPayload, InsightReportPayload};

use chrono::{DateTime, NaiveDate, Utc};

use crate::ai::types::AnalysisError;

/// Parse a timestamp the model produced
///
/// Accepts full RFC 3339 instants and bare `YYYY-MM-DD` dates (midnight
/// UTC). Full instants survive a round trip unchanged.
pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, AnalysisError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AnalysisError::InvalidTimestamp {
            value: value.to_string(),
            message: "expected an ISO-8601 timestamp or date".to_string(),
        })
}

/// Clamp a model-reported confidence into [0, 1]
pub(crate) fn clamp_confidence(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}
