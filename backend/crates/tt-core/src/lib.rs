pub mod error;
pub mod hashtag;
pub mod hashtag_validator;
pub mod models;
pub mod pending_queue;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use hashtag::{Hashtag, TAG_MARKER, WILDCARD_TAG};
pub use hashtag_validator::{HashtagRules, HashtagValidator};
pub use models::subscription_set::SubscriptionSet;
pub use models::tweet::Tweet;
pub use pending_queue::{NO_MESSAGES, PendingQueue};

pub const DEFAULT_MAX_HASHTAG_LEN: usize = 25;
pub const DEFAULT_MAX_HASHTAGS: usize = 8;
pub const DEFAULT_MAX_TWEET_LEN: usize = 150;
pub const DEFAULT_MAX_SUBSCRIPTIONS: usize = 3;
pub const DEFAULT_MAX_QUEUE: usize = 20;
pub const DEFAULT_MAX_USERNAME_LEN: usize = 30;

#[cfg(test)]
mod tests;
