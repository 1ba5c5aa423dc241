use crate::{
    Result as SessionResult, SessionError, SessionState, SlotLease, log_handler_entry,
    RequestContext,
};

use tt_proto::ResponseEnvelope;

use std::panic::Location;

use error_location::ErrorLocation;

/// Claim a slot for a connection that has not validated yet.
pub fn handle_validate_user(
    username: &str,
    state: &SessionState,
    request_ctx: &RequestContext,
) -> SessionResult<(SlotLease, ResponseEnvelope)> {
    log_handler_entry!(request_ctx, "ValidateUser");

    let lease = state.registry.validate_username(username)?;
    state.metrics.users_active(state.registry.occupied_count());

    let response = ResponseEnvelope::user_accepted(
        lease.slot().index(),
        format!("welcome {}", lease.username()),
    );
    Ok((lease, response))
}

/// A connection that already owns a slot may not validate again.
#[track_caller]
pub fn reject_revalidation(lease: &SlotLease) -> SessionError {
    SessionError::AlreadyValidated {
        username: String::from(lease.username()),
        location: ErrorLocation::from(Location::caller()),
    }
}
