use crate::{RequestContext, SessionState, SlotLease, SlotId};

/// Everything a handler may touch while serving one request
pub struct HandlerContext<'a> {
    pub state: &'a SessionState,
    /// Slot owned by the requesting connection
    pub lease: &'a SlotLease,
    pub request_ctx: RequestContext,
}

impl<'a> HandlerContext<'a> {
    pub fn new(state: &'a SessionState, lease: &'a SlotLease, request_ctx: RequestContext) -> Self {
        Self {
            state,
            lease,
            request_ctx,
        }
    }

    pub fn slot(&self) -> SlotId {
        self.lease.slot()
    }

    pub fn username(&self) -> &str {
        self.lease.username()
    }

    pub fn log_prefix(&self) -> String {
        self.request_ctx.log_prefix()
    }
}

impl std::fmt::Debug for HandlerContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerContext")
            .field("slot", &self.lease.slot())
            .field("username", &self.lease.username())
            .field("request_seq", &self.request_ctx.request_seq)
            .finish()
    }
}
