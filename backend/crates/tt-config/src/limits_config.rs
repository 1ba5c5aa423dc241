use crate::{ConfigError, ConfigErrorResult};

use tt_core::{
    DEFAULT_MAX_HASHTAG_LEN, DEFAULT_MAX_HASHTAGS, DEFAULT_MAX_QUEUE, DEFAULT_MAX_SUBSCRIPTIONS,
    DEFAULT_MAX_TWEET_LEN, DEFAULT_MAX_USERNAME_LEN,
};

use serde::Deserialize;

// Limit constraints
pub const MIN_SUBSCRIPTIONS: usize = 1;
pub const MAX_SUBSCRIPTIONS: usize = 64;

pub const MIN_QUEUE: usize = 1;
pub const MAX_QUEUE: usize = 10000;

pub const MIN_TWEET_LEN: usize = 1;
pub const MAX_TWEET_LEN: usize = 1000;

pub const MIN_HASHTAG_LEN: usize = 1;
pub const MAX_HASHTAG_LEN: usize = 100;

pub const MIN_HASHTAGS: usize = 1;
pub const MAX_HASHTAGS: usize = 64;

pub const MIN_USERNAME_LEN: usize = 1;
pub const MAX_USERNAME_LEN: usize = 256;

/// Per-user and per-post limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Hashtags one user may follow, `ALL` included
    pub max_subscriptions: usize,
    /// Undelivered tweets kept per user before new ones are dropped
    pub max_queue: usize,
    pub max_tweet_len: usize,
    pub max_hashtag_len: usize,
    /// Hashtags per post
    pub max_hashtags: usize,
    pub max_username_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_subscriptions: DEFAULT_MAX_SUBSCRIPTIONS,
            max_queue: DEFAULT_MAX_QUEUE,
            max_tweet_len: DEFAULT_MAX_TWEET_LEN,
            max_hashtag_len: DEFAULT_MAX_HASHTAG_LEN,
            max_hashtags: DEFAULT_MAX_HASHTAGS,
            max_username_len: DEFAULT_MAX_USERNAME_LEN,
        }
    }
}

impl LimitsConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        Self::check_range(
            "limits.max_subscriptions",
            self.max_subscriptions,
            MIN_SUBSCRIPTIONS,
            MAX_SUBSCRIPTIONS,
        )?;
        Self::check_range("limits.max_queue", self.max_queue, MIN_QUEUE, MAX_QUEUE)?;
        Self::check_range(
            "limits.max_tweet_len",
            self.max_tweet_len,
            MIN_TWEET_LEN,
            MAX_TWEET_LEN,
        )?;
        Self::check_range(
            "limits.max_hashtag_len",
            self.max_hashtag_len,
            MIN_HASHTAG_LEN,
            MAX_HASHTAG_LEN,
        )?;
        Self::check_range(
            "limits.max_hashtags",
            self.max_hashtags,
            MIN_HASHTAGS,
            MAX_HASHTAGS,
        )?;
        Self::check_range(
            "limits.max_username_len",
            self.max_username_len,
            MIN_USERNAME_LEN,
            MAX_USERNAME_LEN,
        )?;

        Ok(())
    }

    #[track_caller]
    fn check_range(name: &str, value: usize, min: usize, max: usize) -> ConfigErrorResult<()> {
        if value < min || value > max {
            return Err(ConfigError::limits(format!(
                "{} must be {}-{}, got {}",
                name, min, max, value
            )));
        }
        Ok(())
    }
}
