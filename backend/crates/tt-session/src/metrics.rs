use metrics::{counter, gauge, histogram};

/// Metrics collector for session operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            prefix: "tt_session",
        }
    }

    /// Record new connection accepted
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record connection closed
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Record a connection turned away before validation
    pub fn connection_rejected(&self, reason: &str) {
        counter!(format!("{}.connections.rejected", self.prefix)).increment(1);
        counter!(format!("{}.connections.rejected.{}", self.prefix, reason)).increment(1);
    }

    pub fn request_received(&self, request_kind: &str) {
        counter!(format!("{}.requests.received", self.prefix)).increment(1);
        counter!(format!(
            "{}.requests.received.{}",
            self.prefix, request_kind
        ))
        .increment(1);
    }

    pub fn request_latency(&self, duration: std::time::Duration) {
        histogram!(format!("{}.requests.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }

    /// Record a tweet fanned out to `delivered` queues
    pub fn tweet_posted(&self, delivered: usize) {
        counter!(format!("{}.tweets.posted", self.prefix)).increment(1);
        histogram!(format!("{}.tweets.recipients", self.prefix)).record(delivered as f64);
    }

    /// Record a copy discarded because the recipient's queue was full
    pub fn tweet_dropped(&self) {
        counter!(format!("{}.tweets.dropped", self.prefix)).increment(1);
    }

    pub fn subscription_changed(&self, action: &str) {
        counter!(format!("{}.subscriptions.{}", self.prefix, action)).increment(1);
    }

    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }

    pub fn users_active(&self, count: usize) {
        gauge!(format!("{}.users.active", self.prefix)).set(count as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
