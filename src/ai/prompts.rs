//! Prompt assembly for the analysis operations
//!
//! Each operation has a fixed system instruction; the user message carries
//! the caller's data as pretty-printed JSON plus the current date. The
//! system prompts spell out the exact JSON shape so JSON mode stays on
//! rails.

use chrono::Utc;
use serde_json::Value;

pub const ANOMALY_SYSTEM_PROMPT: &str = "\
You are a financial analyst specialized in anomaly detection. Examine the \
provided financial data for variances, unusual trends, outliers, suspicious \
patterns and seasonal irregularities.\n\
Respond with a single JSON object of the form:\n\
{\"anomalies\": [{\"title\": string, \"description\": string, \
\"category\": \"variance\"|\"trend\"|\"outlier\"|\"pattern\"|\"seasonal\", \
\"severity\": \"critical\"|\"high\"|\"medium\"|\"low\", \
\"status\": \"detected\", \
\"affectedMetric\": \"revenue\"|\"expenses\"|\"profit\"|\"cashFlow\"|\"budget\", \
\"detectedAt\": ISO-8601 string, \"updatedAt\": ISO-8601 string, \
\"impact\": {\"description\": string, \"magnitude\": number, \"monetary\": boolean}, \
\"affectedPeriods\": [string], \"context\": string, \
\"possibleCauses\": [string], \"recommendedActions\": [string]}]}\n\
Return an empty anomalies array if the data looks normal.";

pub const INSIGHT_SYSTEM_PROMPT: &str = "\
You are a senior financial advisor. Derive actionable insights from the \
provided financial data, taking any stated user preferences into account.\n\
Respond with a single JSON object of the form:\n\
{\"insights\": [{\"title\": string, \"description\": string, \
\"category\": \"strategic\"|\"operational\"|\"financial\"|\"market\"|\"customer\", \
\"importance\": \"critical\"|\"high\"|\"medium\"|\"low\", \
\"relatedMetrics\": [string], \"actionItems\": [string], \
\"confidenceScore\": number between 0 and 1}], \
\"analysis\": string summarizing the overall financial position}";

pub const TREND_SYSTEM_PROMPT: &str = "\
You are a financial analyst. Explain the trend in the given metric over the \
given timeframe in clear business language: direction, inflection points \
and plausible drivers. Respond with plain prose, no JSON, no markdown.";

pub const FORECAST_SYSTEM_PROMPT: &str = "\
You are a financial forecasting specialist. Project the provided historical \
series over the requested horizon.\n\
Respond with a single JSON object of the form:\n\
{\"periods\": [{\"period\": string, \"value\": number, \
\"lowerBound\": number, \"upperBound\": number}], \
\"assumptions\": [string], \"risks\": [string], \
\"methodology\": string, \"confidenceScore\": number between 0 and 1}";

/// Builds user messages from caller data
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn anomaly_prompt(financial_data: &Value) -> String {
        let mut prompt = String::from("=== Financial Data ===\n");
        prompt.push_str(&pretty(financial_data));
        prompt.push_str("\n\n");
        prompt.push_str(&current_date_line());
        prompt.push_str("\nDetect anomalies in this data.");
        prompt
    }

    pub fn insight_prompt(financial_data: &Value, user_preferences: Option<&Value>) -> String {
        let mut prompt = String::from("=== Financial Data ===\n");
        prompt.push_str(&pretty(financial_data));
        prompt.push_str("\n\n");

        if let Some(prefs) = user_preferences {
            prompt.push_str("=== User Preferences ===\n");
            prompt.push_str(&pretty(prefs));
            prompt.push_str("\n\n");
        }

        prompt.push_str(&current_date_line());
        prompt.push_str("\nGenerate insights from this data.");
        prompt
    }

    pub fn trend_prompt(metric: &str, data: &Value, timeframe: &str) -> String {
        let mut prompt = format!("Metric: {}\nTimeframe: {}\n\n", metric, timeframe);
        prompt.push_str("=== Data Points ===\n");
        prompt.push_str(&pretty(data));
        prompt.push_str("\n\n");
        prompt.push_str(&current_date_line());
        prompt.push_str("\nExplain the trend.");
        prompt
    }

    pub fn forecast_prompt(
        historical_data: &Value,
        forecast_period: &str,
        additional_factors: Option<&Value>,
    ) -> String {
        let mut prompt = String::from("=== Historical Data ===\n");
        prompt.push_str(&pretty(historical_data));
        prompt.push_str("\n\n");
        prompt.push_str(&format!("Forecast horizon: {}\n\n", forecast_period));

        if let Some(factors) = additional_factors {
            prompt.push_str("=== Additional Factors ===\n");
            prompt.push_str(&pretty(factors));
            prompt.push_str("\n\n");
        }

        prompt.push_str(&current_date_line());
        prompt.push_str("\nGenerate the forecast.");
        prompt
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn current_date_line() -> String {
    format!("Current date: {}", Utc::now().format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_anomaly_prompt_carries_data_verbatim() {
        let data = json!({"revenue": [100, 105, 240]});
        let prompt = PromptBuilder::anomaly_prompt(&data);
        assert!(prompt.contains("\"revenue\""));
        assert!(prompt.contains("240"));
        assert!(prompt.contains("Current date:"));
    }

    #[test]
    fn test_insight_prompt_includes_preferences_only_when_given() {
        let data = json!({"margin": 0.4});
        let without = PromptBuilder::insight_prompt(&data, None);
        assert!(!without.contains("User Preferences"));

        let prefs = json!({"focus": "growth"});
        let with = PromptBuilder::insight_prompt(&data, Some(&prefs));
        assert!(with.contains("User Preferences"));
        assert!(with.contains("growth"));
    }

    #[test]
    fn test_trend_prompt_names_metric_and_timeframe() {
        let prompt = PromptBuilder::trend_prompt("revenue", &json!([1, 2, 3]), "Q1");
        assert!(prompt.starts_with("Metric: revenue\nTimeframe: Q1"));
    }
}
