pub mod client_connection;
pub mod error;
pub mod fan_out;
pub mod handlers;
pub mod metrics;
pub mod metrics_timer;
pub mod request_context;
pub mod request_logging;
pub mod session_limits;
pub mod session_state;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod slot_id;
pub mod slot_lease;
pub mod user_registry;
pub mod user_slot;

pub use client_connection::{ClientConnection, ConnectionState};
pub use error::{Result, SessionError};
pub use fan_out::{FanOutEngine, FanOutReport};
pub use handlers::context::HandlerContext;
pub use handlers::dispatcher::{DispatchOutcome, dispatch};
pub use handlers::error_codes::{
    ALREADY_VALIDATED, INTERNAL_ERROR, INVALID_MESSAGE, INVALID_USERNAME, NOT_VALIDATED,
    SERVER_FULL, UNKNOWN_REQUEST, USERNAME_TAKEN, VALIDATION_ERROR,
};
pub use metrics::Metrics;
pub use metrics_timer::MetricsTimer;
pub use request_context::RequestContext;
pub use session_limits::SessionLimits;
pub use session_state::SessionState;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use slot_id::SlotId;
pub use slot_lease::SlotLease;
pub use user_registry::UserRegistry;

#[cfg(test)]
mod tests;

pub const DEFAULT_MAX_USERS: usize = 5;
