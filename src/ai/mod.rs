//! AI analysis module
//!
//! Four operations over the chat-completion collaborator: anomaly
//! detection, insight generation, trend explanation and forecasting.
//! Prompts live in [`prompts`], the completion wire shapes in [`schemas`],
//! the coerced domain records in [`types`].

pub mod engine;
pub mod prompts;
pub mod schemas;
pub mod types;

pub use engine::AnalysisEngine;
pub use types::{
    AnalysisError, AnomalyRecord, Forecast, ForecastPeriod, InsightBundle, InsightRecord,
};
