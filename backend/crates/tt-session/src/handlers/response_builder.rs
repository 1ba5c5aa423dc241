use crate::SessionError;

use tt_proto::{ResponseCode, ResponseEnvelope};

pub const OPERATION_SUCCESS: &str = "operation success";
pub const EXIT_MESSAGE: &str = "bye bye";

/// Successful acknowledgment for `code`
pub fn build_success_response(code: ResponseCode) -> ResponseEnvelope {
    ResponseEnvelope::status(code, OPERATION_SUCCESS)
}

pub fn build_exit_response() -> ResponseEnvelope {
    ResponseEnvelope::status(ResponseCode::Exit, EXIT_MESSAGE)
}

/// Turn a handler error into the response sent back for a request of `code`.
///
/// Username rejections answer as a failed validation; requests that could
/// not be understood at all use the generic invalid code.
pub fn build_error_response(code: ResponseCode, error: &SessionError) -> ResponseEnvelope {
    let message = error.client_message();

    match error {
        SessionError::UsernameTaken { .. }
        | SessionError::ServerFull { .. }
        | SessionError::InvalidUsername { .. } => ResponseEnvelope::user_rejected(message),
        SessionError::Protocol(_)
        | SessionError::NotValidated { .. }
        | SessionError::UnknownRequest { .. } => ResponseEnvelope::invalid(message),
        _ => ResponseEnvelope::status(code, format!("operation failed: {message}")),
    }
}
