mod tweet;

use crate::{Hashtag, HashtagValidator};

/// Build validated tags from a `#a#b` string.
pub(crate) fn tags(raw: &str) -> Vec<Hashtag> {
    HashtagValidator::default().validate(raw).unwrap()
}

/// Build a single validated subscription target.
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
