use crate::DEFAULT_MAX_USERS;

use tt_core::{
    DEFAULT_MAX_QUEUE, DEFAULT_MAX_SUBSCRIPTIONS, DEFAULT_MAX_USERNAME_LEN, HashtagRules,
};

/// Capacity and per-user limits for a session registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Concurrent validated users
    pub max_users: usize,
    pub max_subscriptions: usize,
    /// Pending tweets kept per user
    pub max_queue: usize,
    pub max_username_len: usize,
    pub hashtag_rules: HashtagRules,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_users: DEFAULT_MAX_USERS,
            max_subscriptions: DEFAULT_MAX_SUBSCRIPTIONS,
            max_queue: DEFAULT_MAX_QUEUE,
            max_username_len: DEFAULT_MAX_USERNAME_LEN,
            hashtag_rules: HashtagRules::default(),
        }
    }
}
