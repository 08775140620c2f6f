/// Forecast completion schema
use serde::Deserialize;

use super::clamp_confidence;
use crate::ai::types::{Forecast, ForecastPeriod};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPayload {
    #[serde(default)]
    pub periods: Vec<ForecastPeriodPayload>,
    #[serde(default)]
    pub assumptions: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub methodology: String,
    #[serde(default = "default_confidence")]
    pub confidence_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriodPayload {
    pub period: String,
    pub value: f64,
    #[serde(default)]
    pub lower_bound: Option<f64>,
    #[serde(default)]
    pub upper_bound: Option<f64>,
}

impl ForecastPayload {
    pub fn into_forecast(self) -> Forecast {
        Forecast {
            periods: self
                .periods
                .into_iter()
                .map(|p| ForecastPeriod {
                    period: p.period,
                    value: p.value,
                    lower_bound: p.lower_bound,
                    upper_bound: p.upper_bound,
                })
                .collect(),
            assumptions: self.assumptions,
            risks: self.risks,
            methodology: self.methodology,
            confidence_score: clamp_confidence(self.confidence_score),
        }
    }
}

fn default_confidence() -> f64 {
    0.5
}
