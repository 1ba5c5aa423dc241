use crate::{HandlerContext, Result as SessionResult, log_handler_entry};
use crate::handlers::response_builder::build_success_response;

use tt_proto::{ResponseCode, ResponseEnvelope};

use log::info;

pub fn handle_subscribe(hashtag: &str, ctx: &HandlerContext<'_>) -> SessionResult<ResponseEnvelope> {
    log_handler_entry!(ctx.request_ctx, "Subscribe");

    let tag = ctx.state.validator.validate_subscription(hashtag)?;
    let marked = tag.marked();
    ctx.state.registry.subscribe(ctx.slot(), tag)?;

    info!("{} subscribed to {}", ctx.log_prefix(), marked);
    ctx.state.metrics.subscription_changed("subscribe");

    Ok(build_success_response(ResponseCode::Subscribe))
}

pub fn handle_unsubscribe(
    hashtag: &str,
    ctx: &HandlerContext<'_>,
) -> SessionResult<ResponseEnvelope> {
    log_handler_entry!(ctx.request_ctx, "Unsubscribe");

    let tag = ctx.state.validator.validate_subscription(hashtag)?;
    ctx.state.registry.unsubscribe(ctx.slot(), &tag)?;

    info!("{} unsubscribed from {}", ctx.log_prefix(), tag.marked());
    ctx.state.metrics.subscription_changed("unsubscribe");

    Ok(build_success_response(ResponseCode::Unsubscribe))
}
