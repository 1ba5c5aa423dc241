use std::fmt;

/// Marker that starts every hashtag in user input.
pub const TAG_MARKER: char = '#';

/// Reserved tag meaning "deliver every post".
pub const WILDCARD_TAG: &str = "ALL";

/// A validated hashtag, stored without its leading marker.
///
/// Only [`crate::HashtagValidator`] produces these, so every value already
/// satisfies the charset and length rules it was checked against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hashtag(String);

impl Hashtag {
    pub(crate) fn new(name: &str) -> Self {
        Self(String::from(name))
    }

    /// The wildcard subscription target.
    pub fn wildcard() -> Self {
        Self::new(WILDCARD_TAG)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == WILDCARD_TAG
    }

    /// The tag with its marker, e.g. `#news`.
    pub fn marked(&self) -> String {
        format!("{TAG_MARKER}{}", self.0)
    }
}

impl fmt::Display for Hashtag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Hashtag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Hashtag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Hashtag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
