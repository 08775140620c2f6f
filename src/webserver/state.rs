/// Shared application state
///
/// Everything route handlers need, wired once at startup: the config
/// snapshot, the analysis engine (with its injected completion client)
/// and the financial store.
use std::sync::Arc;

use crate::ai::AnalysisEngine;
use crate::config::Config;
use crate::store::FinancialStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<AnalysisEngine>,
    pub store: Arc<dyn FinancialStore>,
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(
        config: Config,
        engine: Arc<AnalysisEngine>,
        store: Arc<dyn FinancialStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            engine,
            store,
            startup_time: chrono::Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time).num_seconds().max(0) as u64
    }
}
