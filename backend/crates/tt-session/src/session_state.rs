use crate::{FanOutEngine, Metrics, SessionLimits, ShutdownCoordinator, UserRegistry};

use tt_core::HashtagValidator;

/// Shared state handed to every connection task
#[derive(Clone)]
pub struct SessionState {
    pub registry: UserRegistry,
    pub fan_out: FanOutEngine,
    pub validator: HashtagValidator,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
}

impl SessionState {
    pub fn new(limits: SessionLimits) -> Self {
        let metrics = Metrics::new();
        let registry = UserRegistry::new(limits);
        let fan_out = FanOutEngine::new(registry.clone(), metrics.clone());

        Self {
            validator: registry.hashtag_validator(),
            registry,
            fan_out,
            metrics,
            shutdown: ShutdownCoordinator::new(),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(SessionLimits::default())
    }
}
