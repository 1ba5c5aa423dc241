use tt_proto::ProtoError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors that can occur while talking to the server
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to connect to {addr}: {source} {location}")]
    Connect {
        addr: String,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Protocol error: {message} {location}")]
    Protocol {
        message: String,
        location: ErrorLocation,
        #[source]
        source: ProtoError,
    },

    #[error("{message}")]
    Rejected {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server closed the connection {location}")]
    Closed { location: ErrorLocation },
}

impl ClientError {
    #[track_caller]
    pub fn from_proto(err: ProtoError) -> Self {
        ClientError::Protocol {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn rejected<S: Into<String>>(message: S) -> Self {
        ClientError::Rejected {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn closed() -> Self {
        ClientError::Closed {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ProtoError> for ClientError {
    #[track_caller]
    fn from(err: ProtoError) -> Self {
        ClientError::from_proto(err)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
