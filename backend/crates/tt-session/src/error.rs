use crate::{
    ALREADY_VALIDATED, INTERNAL_ERROR, INVALID_MESSAGE, INVALID_USERNAME, NOT_VALIDATED,
    SERVER_FULL, SlotId, UNKNOWN_REQUEST, USERNAME_TAKEN, VALIDATION_ERROR,
};

use tt_core::CoreError;
use tt_proto::ProtoError;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Username '{username}' is taken {location}")]
    UsernameTaken {
        username: String,
        location: ErrorLocation,
    },

    #[error("Server full: {current} users (max: {max}) {location}")]
    ServerFull {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Invalid username: {message} {location}")]
    InvalidUsername {
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation failed: {0}")]
    Validation(#[from] CoreError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtoError),

    #[error("Request {request} sent before username validation {location}")]
    NotValidated {
        request: &'static str,
        location: ErrorLocation,
    },

    #[error("Connection already validated as '{username}' {location}")]
    AlreadyValidated {
        username: String,
        location: ErrorLocation,
    },

    #[error("Unknown request code {code} {location}")]
    UnknownRequest { code: i32, location: ErrorLocation },

    #[error("Slot {slot} is not occupied {location}")]
    SlotNotOccupied {
        slot: SlotId,
        location: ErrorLocation,
    },
}

impl SessionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UsernameTaken { .. } => USERNAME_TAKEN,
            Self::ServerFull { .. } => SERVER_FULL,
            Self::InvalidUsername { .. } => INVALID_USERNAME,
            Self::Validation(_) => VALIDATION_ERROR,
            Self::Protocol(_) => INVALID_MESSAGE,
            Self::NotValidated { .. } => NOT_VALIDATED,
            Self::AlreadyValidated { .. } => ALREADY_VALIDATED,
            Self::UnknownRequest { .. } => UNKNOWN_REQUEST,
            Self::SlotNotOccupied { .. } => INTERNAL_ERROR,
        }
    }

    /// Text sent back in `detailedMessage`. Never carries source locations.
    pub fn client_message(&self) -> String {
        match self {
            Self::UsernameTaken { .. } => String::from("username taken"),
            Self::ServerFull { .. } => String::from("server full"),
            Self::InvalidUsername { message, .. } => format!("invalid username: {message}"),
            Self::Validation(source) => source.reason(),
            Self::Protocol(ProtoError::MissingField { field, .. }) => {
                format!("malformed request: missing {field}")
            }
            Self::Protocol(_) => String::from("malformed request"),
            Self::NotValidated { .. } => String::from("username not validated"),
            Self::AlreadyValidated { username, .. } => {
                format!("already validated as {username}")
            }
            Self::UnknownRequest { code, .. } => format!("unrecognized request code {code}"),
            Self::SlotNotOccupied { .. } => String::from("internal error"),
        }
    }

    /// Errors that end the connection instead of being answered.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Protocol(source) if source.is_framing())
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
