use crate::{CoreError, Hashtag, Result as CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Ordered, bounded set of hashtags one user follows.
///
/// The wildcard `ALL` takes a normal slot like any other tag.
#[derive(Debug, Clone)]
pub struct SubscriptionSet {
    tags: Vec<Hashtag>,
    max: usize,
}

impl SubscriptionSet {
    pub fn new(max: usize) -> Self {
        Self {
            tags: Vec::with_capacity(max),
            max,
        }
    }

    #[track_caller]
    pub fn subscribe(&mut self, tag: Hashtag) -> CoreResult<()> {
        if self.tags.contains(&tag) {
            return Err(CoreError::AlreadySubscribed {
                tag: tag.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.tags.len() >= self.max {
            return Err(CoreError::SubscriptionListFull {
                max: self.max,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.tags.push(tag);
        Ok(())
    }

    #[track_caller]
    pub fn unsubscribe(&mut self, tag: &Hashtag) -> CoreResult<()> {
        let Some(index) = self.tags.iter().position(|t| t == tag) else {
            return Err(CoreError::NotSubscribed {
                tag: tag.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        self.tags.remove(index);
        Ok(())
    }

    /// True when `ALL` is one of the subscriptions.
    pub fn receives_all(&self) -> bool {
        self.tags.iter().any(Hashtag::is_wildcard)
    }

    /// First posted tag matching a subscription, scanning subscriptions in
    /// the order they were added.
    pub fn first_match<'a>(&self, hashtags: &'a [Hashtag]) -> Option<&'a Hashtag> {
        self.tags
            .iter()
            .find_map(|sub| hashtags.iter().find(|tag| *tag == sub))
    }

    pub fn contains(&self, tag: &Hashtag) -> bool {
        self.tags.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hashtag> {
        self.tags.iter()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max
    }
}
