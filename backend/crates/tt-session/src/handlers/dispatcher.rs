use crate::handlers::response_builder::{build_error_response, build_exit_response};
use crate::handlers::subscription::{handle_subscribe, handle_unsubscribe};
use crate::handlers::timeline::handle_timeline;
use crate::handlers::tweet::handle_tweet;
use crate::handlers::user::reject_revalidation;
use crate::{HandlerContext, SessionError};

use tt_proto::{Request, RequestCode, ResponseCode, ResponseEnvelope};

use std::panic::Location;

use error_location::ErrorLocation;
use log::{info, warn};

/// Response for one request on a validated connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub response: ResponseEnvelope,
    /// Connection ends after the response is written
    pub close: bool,
}

impl DispatchOutcome {
    pub fn reply(response: ResponseEnvelope) -> Self {
        Self {
            response,
            close: false,
        }
    }

    pub fn closing(response: ResponseEnvelope) -> Self {
        Self {
            response,
            close: true,
        }
    }
}

/// Route a request from a validated connection to its handler.
///
/// Handler errors are answered, never propagated; the caller decides what
/// to do with the connection only through `close`.
pub fn dispatch(request: Request, ctx: &HandlerContext<'_>) -> DispatchOutcome {
    let handler_name = request.name();
    let log_prefix = ctx.log_prefix();
    let response_code = response_code_for(&request);

    ctx.state.metrics.request_received(handler_name);

    let result = match &request {
        Request::Tweet { body, hashtags } => handle_tweet(body, hashtags, ctx),
        Request::Subscribe { hashtag } => handle_subscribe(hashtag, ctx),
        Request::Unsubscribe { hashtag } => handle_unsubscribe(hashtag, ctx),
        Request::Timeline => handle_timeline(ctx),
        Request::Exit => {
            info!("{} exit requested", log_prefix);
            return DispatchOutcome::closing(build_exit_response());
        }
        Request::ValidateUser { .. } => Err(reject_revalidation(ctx.lease)),
        Request::Unknown { code } => Err(SessionError::UnknownRequest {
            code: *code,
            location: ErrorLocation::from(Location::caller()),
        }),
    };

    let outcome = match result {
        Ok(response) => DispatchOutcome::reply(response),
        Err(e) => {
            warn!(
                "{} Handler {} failed: {} (code: {})",
                log_prefix,
                handler_name,
                e,
                e.error_code()
            );
            ctx.state.metrics.error_occurred(e.error_code());
            DispatchOutcome::reply(build_error_response(response_code, &e))
        }
    };

    info!(
        "{} <- {} completed in {}ms",
        log_prefix,
        handler_name,
        ctx.request_ctx.elapsed_ms()
    );

    outcome
}

/// Response code paired with a request's kind.
pub fn response_code_for(request: &Request) -> ResponseCode {
    RequestCode::try_from(request.code())
        .map(RequestCode::response)
        .unwrap_or(ResponseCode::Invalid)
}
