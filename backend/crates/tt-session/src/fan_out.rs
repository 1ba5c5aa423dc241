use crate::{Metrics, UserRegistry};

use tt_core::{Hashtag, Tweet};

use std::sync::Arc;

use log::{debug, warn};
use parking_lot::Mutex;

/// Outcome of distributing one post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOutReport {
    pub tweet_id: u64,
    /// Recipients whose queue accepted the post
    pub delivered: usize,
    /// Recipients that matched but had a full queue
    pub dropped: usize,
}

/// Staging buffer for the most recent post. Holding its lock is what
/// serializes posts against each other.
struct Staging {
    latest: Option<Tweet>,
    next_id: u64,
}

/// Copies accepted posts into every matching user's pending queue.
#[derive(Clone)]
pub struct FanOutEngine {
    registry: UserRegistry,
    staging: Arc<Mutex<Staging>>,
    metrics: Metrics,
}

impl FanOutEngine {
    pub fn new(registry: UserRegistry, metrics: Metrics) -> Self {
        Self {
            registry,
            staging: Arc::new(Mutex::new(Staging {
                latest: None,
                next_id: 1,
            })),
            metrics,
        }
    }

    /// Stage a validated post and distribute it before returning.
    pub fn post(&self, sender: &str, body: &str, hashtags: Vec<Hashtag>) -> FanOutReport {
        let mut staging = self.staging.lock();

        let id = staging.next_id;
        staging.next_id += 1;
        let tweet = staging
            .latest
            .insert(Tweet::new(id, sender, body, hashtags));

        let report = self.distribute(tweet);
        drop(staging);

        self.metrics.tweet_posted(report.delivered);
        report
    }

    /// Most recently staged post.
    pub fn latest(&self) -> Option<Tweet> {
        self.staging.lock().latest.clone()
    }

    /// One pass over every slot for the staged `tweet`.
    /// Only called from [`post`](Self::post) with the staging lock held.
    fn distribute(&self, tweet: &Tweet) -> FanOutReport {
        let mut report = FanOutReport {
            tweet_id: tweet.id,
            delivered: 0,
            dropped: 0,
        };

        for (index, cell) in self.registry.slots().iter().enumerate() {
            let mut slot = cell.lock();
            let Some(rendered) = slot.render(tweet) else {
                continue;
            };

            if slot.queue.enqueue(rendered) {
                report.delivered += 1;
            } else {
                report.dropped += 1;
                warn!(
                    "Pending queue full for slot {}, dropped tweet {}",
                    index, tweet.id
                );
                self.metrics.tweet_dropped();
            }
        }

        debug!(
            "Tweet {} from '{}' delivered to {} users ({} dropped)",
            tweet.id, tweet.sender, report.delivered, report.dropped
        );
        report
    }
}
