use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtoError {
    #[error("IO error: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("JSON error: {source} {location}")]
    Json {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Invalid frame header: {header:?} {location}")]
    InvalidHeader {
        header: String,
        location: ErrorLocation,
    },

    #[error("Frame too large: {size} bytes (max: {max}) {location}")]
    FrameTooLarge {
        size: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Missing field '{field}' for request code {code} {location}")]
    MissingField {
        field: &'static str,
        code: i32,
        location: ErrorLocation,
    },
}

impl ProtoError {
    /// Errors after which the byte stream can no longer be trusted.
    pub fn is_framing(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::InvalidHeader { .. } | Self::FrameTooLarge { .. }
        )
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "IO_ERROR",
            Self::Json { .. } => "DECODE_ERROR",
            Self::InvalidHeader { .. } => "INVALID_HEADER",
            Self::FrameTooLarge { .. } => "FRAME_TOO_LARGE",
            Self::MissingField { .. } => "MISSING_FIELD",
        }
    }

    #[track_caller]
    pub fn missing_field(field: &'static str, code: i32) -> Self {
        Self::MissingField {
            field,
            code,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for ProtoError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ProtoError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Json {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProtoError>;
