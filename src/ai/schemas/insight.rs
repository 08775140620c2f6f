/// Insight generation completion schema
use serde::Deserialize;
use uuid::Uuid;

use super::clamp_confidence;
use crate::ai::types::{InsightBundle, InsightCategory, InsightRecord, Severity};

#[derive(Debug, Clone, Deserialize)]
pub struct InsightReportPayload {
    #[serde(default)]
    pub insights: Vec<InsightPayload>,
    #[serde(default)]
    pub analysis: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightPayload {
    #[serde(default = "generated_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: InsightCategory,
    pub importance: Severity,
    #[serde(default)]
    pub related_metrics: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default = "default_confidence")]
    pub confidence_score: f64,
}

impl InsightReportPayload {
    pub fn into_bundle(self) -> InsightBundle {
        InsightBundle {
            insights: self.insights.into_iter().map(InsightPayload::into_record).collect(),
            analysis: self.analysis,
        }
    }
}

impl InsightPayload {
    fn into_record(self) -> InsightRecord {
        InsightRecord {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            importance: self.importance,
            related_metrics: self.related_metrics,
            action_items: self.action_items,
            confidence_score: clamp_confidence(self.confidence_score),
        }
    }
}

fn generated_id() -> String {
    format!("insight-{}", Uuid::new_v4())
}

fn default_confidence() -> f64 {
    0.5
}
