/// Anomaly detection completion schema
use serde::Deserialize;
use uuid::Uuid;

use super::parse_timestamp;
use crate::ai::types::{
    AffectedMetric, AnalysisError, AnomalyCategory, AnomalyImpact, AnomalyRecord, AnomalyStatus,
    Severity,
};

#[derive(Debug, Clone, Deserialize)]
pub struct AnomalyReportPayload {
    #[serde(default)]
    pub anomalies: Vec<AnomalyPayload>,
}

/// One anomaly as emitted by the model (timestamps still strings)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyPayload {
    #[serde(default = "generated_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: AnomalyCategory,
    pub severity: Severity,
    #[serde(default)]
    pub status: AnomalyStatus,
    pub affected_metric: AffectedMetric,
    pub detected_at: String,
    pub updated_at: String,
    pub impact: AnomalyImpact,
    #[serde(default)]
    pub affected_periods: Vec<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub possible_causes: Vec<String>,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
}

impl AnomalyPayload {
    /// Coerce the wire shape into a domain record (ISO strings -> datetimes)
    pub fn into_record(self) -> Result<AnomalyRecord, AnalysisError> {
        let detected_at = parse_timestamp(&self.detected_at)?;
        let updated_at = parse_timestamp(&self.updated_at)?;

        Ok(AnomalyRecord {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            severity: self.severity,
            status: self.status,
            affected_metric: self.affected_metric,
            detected_at,
            updated_at,
            impact: self.impact,
            affected_periods: self.affected_periods,
            context: self.context,
            possible_causes: self.possible_causes,
            recommended_actions: self.recommended_actions,
        })
    }
}

fn generated_id() -> String {
    format!("anomaly-{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::SecondsFormat;

    const SAMPLE: &str = r#"{
        "anomalies": [{
            "title": "Marketing spend spike",
            "description": "March marketing expenses exceeded budget by 42%",
            "category": "variance",
            "severity": "high",
            "affectedMetric": "expenses",
            "detectedAt": "2026-03-14T09:00:00Z",
            "updatedAt": "2026-03-14T09:00:00Z",
            "impact": {"description": "Budget overrun", "magnitude": 42000.0, "monetary": true},
            "affectedPeriods": ["2026-03"],
            "possibleCauses": ["Unplanned campaign"]
        }]
    }"#;

    #[test]
    fn test_payload_coerces_to_record() {
        let payload: AnomalyReportPayload = serde_json::from_str(SAMPLE).unwrap();
        let record = payload.anomalies[0].clone().into_record().unwrap();

        assert_eq!(record.category, AnomalyCategory::Variance);
        assert_eq!(record.severity, Severity::High);
        assert_eq!(record.status, AnomalyStatus::Detected); // defaulted
        assert_eq!(record.affected_metric, AffectedMetric::Expenses);
        assert!(record.impact.monetary);
        // omitted id gets generated
        assert!(record.id.starts_with("anomaly-"));
        // full instants survive the round trip
        assert_eq!(
            record.detected_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            "2026-03-14T09:00:00Z"
        );
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let mut payload: AnomalyReportPayload = serde_json::from_str(SAMPLE).unwrap();
        payload.anomalies[0].detected_at = "soon".to_string();
        assert!(payload.anomalies[0].clone().into_record().is_err());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let bad = SAMPLE.replace("\"variance\"", "\"weirdness\"");
        assert!(serde_json::from_str::<AnomalyReportPayload>(&bad).is_err());
    }
}
