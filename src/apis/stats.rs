/// Per-client request statistics
use serde::Serialize;
use tokio::sync::RwLock;

/// Snapshot of a client's usage counters
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ApiStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub avg_latency_ms: f64,
}

#[derive(Default)]
struct StatsInner {
    total: u64,
    successful: u64,
    failed: u64,
    latency_sum_ms: f64,
}

/// Tracks request outcomes and latency for one API client
#[derive(Default)]
pub struct ApiStatsTracker {
    inner: RwLock<StatsInner>,
}

impl ApiStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_request(&self, success: bool, latency_ms: f64) {
        let mut inner = self.inner.write().await;
        inner.total += 1;
        if success {
            inner.successful += 1;
            inner.latency_sum_ms += latency_ms;
        } else {
            inner.failed += 1;
        }
    }

    pub async fn get_stats(&self) -> ApiStats {
        let inner = self.inner.read().await;
        ApiStats {
            total_requests: inner.total,
            successful_requests: inner.successful,
            failed_requests: inner.failed,
            avg_latency_ms: if inner.successful > 0 {
                inner.latency_sum_ms / inner.successful as f64
            } else {
                0.0
            },
        }
    }
}
