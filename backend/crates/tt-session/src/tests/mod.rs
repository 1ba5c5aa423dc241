mod client_connection;
mod property_tests;

use crate::{SessionLimits, SessionState};

use tt_core::{Hashtag, HashtagValidator};

pub(crate) fn limits(max_users: usize) -> SessionLimits {
    SessionLimits {
        max_users,
        ..SessionLimits::default()
    }
}

pub(crate) fn state(max_users: usize) -> SessionState {
    SessionState::new(limits(max_users))
}

/// Validated tags from a `#a#b` string.
pub(crate) fn tags(raw: &str) -> Vec<Hashtag> {
    HashtagValidator::default().validate(raw).unwrap()
}

pub(crate) fn tag(raw: &str) -> Hashtag {
    let marked = if raw.starts_with('#') {
        String::from(raw)
    } else {
        format!("#{raw}")
    };
    HashtagValidator::default()
        .validate_subscription(&marked)
        .unwrap()
}
