use crate::{HandlerContext, Result as SessionResult, log_handler_entry};
use crate::handlers::response_builder::build_success_response;

use tt_proto::{ResponseCode, ResponseEnvelope};

use log::debug;

/// Validate a post, fan it out, then acknowledge.
///
/// Nothing is staged unless both the body and every hashtag pass.
pub fn handle_tweet(
    body: &str,
    hashtags: &[String],
    ctx: &HandlerContext<'_>,
) -> SessionResult<ResponseEnvelope> {
    log_handler_entry!(ctx.request_ctx, "Tweet");

    let validator = &ctx.state.validator;
    validator.validate_body(body)?;
    let tags = validator.validate_list(hashtags)?;

    let report = ctx.state.fan_out.post(ctx.username(), body, tags);
    debug!(
        "{} tweet {} reached {} users",
        ctx.log_prefix(),
        report.tweet_id,
        report.delivered
    );

    Ok(build_success_response(ResponseCode::Tweet))
}
