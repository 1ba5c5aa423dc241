use crate::SlotId;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Per-request data used to correlate log lines
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Sequence number within this server instance
    pub request_seq: u64,
    pub peer: Option<SocketAddr>,
    /// Set once the connection holds a validated name
    pub username: Option<String>,
    pub slot: Option<SlotId>,
    pub started_at: Instant,
}

impl RequestContext {
    pub fn new(peer: Option<SocketAddr>, username: Option<&str>, slot: Option<SlotId>) -> Self {
        Self {
            request_seq: REQUEST_COUNTER.fetch_add(1, Ordering::SeqCst),
            peer,
            username: username.map(String::from),
            slot,
            started_at: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    pub fn log_prefix(&self) -> String {
        let user = self.username.as_deref().unwrap_or("-");
        match self.slot {
            Some(slot) => format!("[req={} user={} slot={}]", self.request_seq, user, slot),
            None => format!("[req={} user={} slot=-]", self.request_seq, user),
        }
    }
}
