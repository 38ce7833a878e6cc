use std::sync::Mutex;

/// Counters for form submissions and image exports.
pub struct SubmissionMetrics {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub accepted: usize,
    pub rejected: usize,
    pub exports: usize,
}

#[derive(Default)]
struct Metrics {
    accepted: usize,
    rejected: usize,
    exports: usize,
}

impl SubmissionMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_accepted(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.accepted += 1;
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rejected += 1;
        }
    }

    pub fn record_export(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.exports += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                accepted: metrics.accepted,
                rejected: metrics.rejected,
                exports: metrics.exports,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for SubmissionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_events() {
        let metrics = SubmissionMetrics::new();
        metrics.record_accepted();
        metrics.record_accepted();
        metrics.record_rejected();
        metrics.record_export();
        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                accepted: 2,
                rejected: 1,
                exports: 1
            }
        );
    }
}
