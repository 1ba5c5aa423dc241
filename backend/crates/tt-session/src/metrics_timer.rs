use crate::Metrics;

use std::time::Instant;

/// Times one request and records it on `finish`
pub struct MetricsTimer {
    start: Instant,
    metrics: Metrics,
}

impl MetricsTimer {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    pub fn finish(self) {
        self.metrics.request_latency(self.start.elapsed());
    }
}
