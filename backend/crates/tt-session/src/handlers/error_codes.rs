//! Stable error codes attached to session errors.

/// Username already held by a connected user
pub const USERNAME_TAKEN: &str = "USERNAME_TAKEN";

/// Every user slot is occupied
pub const SERVER_FULL: &str = "SERVER_FULL";

/// Username is empty, too long or has whitespace
pub const INVALID_USERNAME: &str = "INVALID_USERNAME";

/// Hashtag, body or subscription rule violated
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// Payload could not be decoded
pub const INVALID_MESSAGE: &str = "INVALID_MESSAGE";

/// Request needs a validated username
pub const NOT_VALIDATED: &str = "NOT_VALIDATED";

/// Second VALIDATE_USER on one connection
pub const ALREADY_VALIDATED: &str = "ALREADY_VALIDATED";

/// Request code no handler knows
pub const UNKNOWN_REQUEST: &str = "UNKNOWN_REQUEST";

pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
