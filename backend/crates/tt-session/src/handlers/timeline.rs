use crate::{HandlerContext, Result as SessionResult, log_handler_entry};

use tt_proto::ResponseEnvelope;

/// Hand over everything queued for the caller.
pub fn handle_timeline(ctx: &HandlerContext<'_>) -> SessionResult<ResponseEnvelope> {
    log_handler_entry!(ctx.request_ctx, "Timeline");

    let stored = ctx.state.registry.drain(ctx.slot())?;
    Ok(ResponseEnvelope::timeline(stored))
}
