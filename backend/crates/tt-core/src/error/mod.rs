use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Hashtag input is empty {location}")]
    EmptyHashtags { location: ErrorLocation },

    #[error("Hashtag must start with '#': {input} {location}")]
    MissingTagMarker {
        input: String,
        location: ErrorLocation,
    },

    #[error("Hashtag contains invalid character '{character}' {location}")]
    InvalidTagCharacter {
        character: char,
        location: ErrorLocation,
    },

    #[error("Empty hashtag between markers {location}")]
    EmptyTag { location: ErrorLocation },

    #[error("Hashtag '{tag}' is longer than {max} characters {location}")]
    TagTooLong {
        tag: String,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Too many hashtags: {count} (max: {max}) {location}")]
    TooManyTags {
        count: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Duplicate hashtag '{tag}' {location}")]
    DuplicateTag { tag: String, location: ErrorLocation },

    #[error("Hashtag '{tag}' is reserved {location}")]
    ReservedTag { tag: String, location: ErrorLocation },

    #[error("Tweet body is empty {location}")]
    EmptyBody { location: ErrorLocation },

    #[error("Tweet body has {len} characters (max: {max}) {location}")]
    BodyTooLong {
        len: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Already subscribed to '{tag}' {location}")]
    AlreadySubscribed { tag: String, location: ErrorLocation },

    #[error("Subscription list full ({max} max) {location}")]
    SubscriptionListFull { max: usize, location: ErrorLocation },

    #[error("Not subscribed to '{tag}' {location}")]
    NotSubscribed { tag: String, location: ErrorLocation },
}

impl CoreError {
    /// Short description for status fields, without the source location.
    pub fn reason(&self) -> String {
        match self {
            Self::EmptyHashtags { .. } => String::from("hashtag required"),
            Self::MissingTagMarker { input, .. } => {
                format!("hashtag must start with '#': {input}")
            }
            Self::InvalidTagCharacter { character, .. } => {
                format!("hashtag contains invalid character '{character}'")
            }
            Self::EmptyTag { .. } => String::from("empty hashtag"),
            Self::TagTooLong { tag, max, .. } => {
                format!("hashtag '{tag}' is longer than {max} characters")
            }
            Self::TooManyTags { count, max, .. } => {
                format!("too many hashtags: {count} (max {max})")
            }
            Self::DuplicateTag { tag, .. } => format!("duplicate hashtag '{tag}'"),
            Self::ReservedTag { tag, .. } => format!("hashtag '{tag}' is reserved"),
            Self::EmptyBody { .. } => String::from("tweet is empty"),
            Self::BodyTooLong { len, max, .. } => {
                format!("tweet is {len} characters (max {max})")
            }
            Self::AlreadySubscribed { tag, .. } => format!("already subscribed to #{tag}"),
            Self::SubscriptionListFull { max, .. } => {
                format!("subscription list full ({max} max)")
            }
            Self::NotSubscribed { tag, .. } => format!("not subscribed to #{tag}"),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
