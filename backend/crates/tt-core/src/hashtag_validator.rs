use crate::{
    CoreError, DEFAULT_MAX_HASHTAG_LEN, DEFAULT_MAX_HASHTAGS, DEFAULT_MAX_TWEET_LEN, Hashtag,
    Result as CoreResult, TAG_MARKER, WILDCARD_TAG,
};

use std::collections::HashSet;
use std::panic::Location;

use error_location::ErrorLocation;

/// Limits applied by [`HashtagValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashtagRules {
    /// Maximum characters per tag, marker excluded
    pub max_tag_len: usize,
    /// Maximum tags per post
    pub max_tags: usize,
    /// Maximum characters in a tweet body
    pub max_body_len: usize,
}

impl Default for HashtagRules {
    fn default() -> Self {
        Self {
            max_tag_len: DEFAULT_MAX_HASHTAG_LEN,
            max_tags: DEFAULT_MAX_HASHTAGS,
            max_body_len: DEFAULT_MAX_TWEET_LEN,
        }
    }
}

/// Validates hashtag input and tweet bodies.
///
/// Rules are checked in a fixed order and the first failure is returned:
///
/// 1. input is non-empty
/// 2. every tag starts with `#` and holds only ASCII alphanumerics
/// 3. no empty tag (adjacent markers or a trailing marker)
/// 4. tag length is within `max_tag_len`
/// 5. tag count is within `max_tags`
/// 6. no duplicate tags
/// 7. `ALL` is not among posted tags
///
/// Nothing here logs or mutates state.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashtagValidator {
    rules: HashtagRules,
}

impl HashtagValidator {
    pub fn new(rules: HashtagRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> HashtagRules {
        self.rules
    }

    /// Validate a raw hashtag string such as `#news#sports`.
    #[track_caller]
    pub fn validate(&self, raw: &str) -> CoreResult<Vec<Hashtag>> {
        if raw.is_empty() {
            return Err(CoreError::EmptyHashtags {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let Some(rest) = raw.strip_prefix(TAG_MARKER) else {
            return Err(CoreError::MissingTagMarker {
                input: String::from(raw),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let tags: Vec<&str> = rest.split(TAG_MARKER).collect();
        self.check_post_tags(&tags)
    }

    /// Validate a decoded list of tags, each with or without its marker.
    #[track_caller]
    pub fn validate_list<S: AsRef<str>>(&self, tags: &[S]) -> CoreResult<Vec<Hashtag>> {
        if tags.is_empty() {
            return Err(CoreError::EmptyHashtags {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let tags: Vec<&str> = tags
            .iter()
            .map(|tag| {
                let tag = tag.as_ref();
                tag.strip_prefix(TAG_MARKER).unwrap_or(tag)
            })
            .collect();
        self.check_post_tags(&tags)
    }

    /// Validate a single `#tag` subscription target. `#ALL` is accepted here.
    #[track_caller]
    pub fn validate_subscription(&self, raw: &str) -> CoreResult<Hashtag> {
        if raw.is_empty() {
            return Err(CoreError::EmptyHashtags {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let Some(tag) = raw.strip_prefix(TAG_MARKER) else {
            return Err(CoreError::MissingTagMarker {
                input: String::from(raw),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let tags: Vec<&str> = tag.split(TAG_MARKER).collect();
        self.check_tags(&tags)?;

        if tags.len() != 1 {
            return Err(CoreError::TooManyTags {
                count: tags.len(),
                max: 1,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Hashtag::new(tag))
    }

    /// Validate a tweet body: non-empty and within `max_body_len` characters.
    #[track_caller]
    pub fn validate_body(&self, body: &str) -> CoreResult<()> {
        if body.is_empty() {
            return Err(CoreError::EmptyBody {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let len = body.chars().count();
        if len > self.rules.max_body_len {
            return Err(CoreError::BodyTooLong {
                len,
                max: self.rules.max_body_len,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Rules 2 through 7 over marker-stripped tags.
    #[track_caller]
    fn check_post_tags(&self, tags: &[&str]) -> CoreResult<Vec<Hashtag>> {
        self.check_tags(tags)?;

        if tags.len() > self.rules.max_tags {
            return Err(CoreError::TooManyTags {
                count: tags.len(),
                max: self.rules.max_tags,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut seen = HashSet::with_capacity(tags.len());
        for tag in tags {
            if !seen.insert(*tag) {
                return Err(CoreError::DuplicateTag {
                    tag: String::from(*tag),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        if let Some(reserved) = tags.iter().find(|tag| **tag == WILDCARD_TAG) {
            return Err(CoreError::ReservedTag {
                tag: String::from(*reserved),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(tags.iter().map(|tag| Hashtag::new(tag)).collect())
    }

    /// Charset, empty-tag and length checks, in that order across all tags.
    #[track_caller]
    fn check_tags(&self, tags: &[&str]) -> CoreResult<()> {
        if let Some(character) = tags
            .iter()
            .flat_map(|tag| tag.chars())
            .find(|c| !c.is_ascii_alphanumeric())
        {
            return Err(CoreError::InvalidTagCharacter {
                character,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if tags.iter().any(|tag| tag.is_empty()) {
            return Err(CoreError::EmptyTag {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(tag) = tags.iter().find(|tag| tag.len() > self.rules.max_tag_len) {
            return Err(CoreError::TagTooLong {
                tag: String::from(*tag),
                max: self.rules.max_tag_len,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
