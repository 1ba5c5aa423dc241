use crate::SessionLimits;

use tt_core::{PendingQueue, SubscriptionSet, Tweet};

/// One position in the registry. Free when `username` is `None`.
#[derive(Debug)]
pub(crate) struct UserSlot {
    pub(crate) username: Option<String>,
    pub(crate) subscriptions: SubscriptionSet,
    pub(crate) queue: PendingQueue,
}

impl UserSlot {
    pub(crate) fn new(limits: &SessionLimits) -> Self {
        Self {
            username: None,
            subscriptions: SubscriptionSet::new(limits.max_subscriptions),
            queue: PendingQueue::new(limits.max_queue),
        }
    }

    pub(crate) fn is_occupied(&self) -> bool {
        self.username.is_some()
    }

    pub(crate) fn occupy(&mut self, username: &str) {
        self.username = Some(String::from(username));
    }

    /// Back to free: name, subscriptions and queued tweets are discarded.
    pub(crate) fn clear(&mut self) {
        self.username = None;
        self.subscriptions.clear();
        self.queue.clear();
    }

    /// Rendered copy of `tweet` for this user, if any subscription matches.
    /// Wildcard subscribers are credited with the tweet's first hashtag.
    pub(crate) fn render(&self, tweet: &Tweet) -> Option<String> {
        let recipient = self.username.as_deref()?;

        let origin = if self.subscriptions.receives_all() {
            tweet.first_hashtag()
        } else {
            self.subscriptions.first_match(&tweet.hashtags)
        };

        Some(tweet.render_for(recipient, origin?))
    }
}
