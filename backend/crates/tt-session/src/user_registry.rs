use crate::user_slot::UserSlot;
use crate::{Result as SessionResult, SessionError, SessionLimits, SlotId, SlotLease};

use tt_core::{Hashtag, HashtagValidator};
use tt_proto::{ResponseEnvelope, TIMELINE_BUDGET};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, info, warn};
use parking_lot::Mutex;

/// Fixed pool of user slots shared by every connection.
///
/// Lock order: `claim_lock` (or the fan-out lock) before any slot lock.
/// Slot locks are never held while taking another lock, and nothing here
/// is held across an `.await`.
pub struct UserRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    slots: Box<[Mutex<UserSlot>]>,
    /// Serializes Free -> Occupied transitions
    claim_lock: Mutex<()>,
    limits: SessionLimits,
}

impl UserRegistry {
    pub fn new(limits: SessionLimits) -> Self {
        let slots = (0..limits.max_users)
            .map(|_| Mutex::new(UserSlot::new(&limits)))
            .collect();

        Self {
            inner: Arc::new(RegistryInner {
                slots,
                claim_lock: Mutex::new(()),
                limits,
            }),
        }
    }

    pub fn limits(&self) -> &SessionLimits {
        &self.inner.limits
    }

    /// Claim the first free slot for `username`.
    ///
    /// A name held by an occupied slot is rejected before capacity is
    /// considered. The returned lease frees the slot when dropped.
    #[track_caller]
    pub fn validate_username(&self, username: &str) -> SessionResult<SlotLease> {
        self.check_username(username)?;

        let _claim = self.inner.claim_lock.lock();

        let mut free = None;
        let mut occupied = 0;
        for (index, cell) in self.inner.slots.iter().enumerate() {
            let slot = cell.lock();
            match slot.username.as_deref() {
                Some(existing) if existing == username => {
                    warn!("Username '{}' already connected (slot {})", username, index);
                    return Err(SessionError::UsernameTaken {
                        username: String::from(username),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                Some(_) => occupied += 1,
                None if free.is_none() => free = Some(index),
                None => {}
            }
        }

        let Some(index) = free else {
            warn!(
                "User limit reached: {}/{}",
                occupied, self.inner.limits.max_users
            );
            return Err(SessionError::ServerFull {
                current: occupied,
                max: self.inner.limits.max_users,
                location: ErrorLocation::from(Location::caller()),
            });
        };

        self.inner.slots[index].lock().occupy(username);
        info!(
            "Validated '{}' in slot {} ({} users)",
            username,
            index,
            occupied + 1
        );

        Ok(SlotLease::new(self.clone(), SlotId::new(index), username))
    }

    #[track_caller]
    pub fn subscribe(&self, slot: SlotId, tag: Hashtag) -> SessionResult<()> {
        let mut guard = self.occupied_slot(slot)?;
        guard.subscriptions.subscribe(tag)?;
        Ok(())
    }

    #[track_caller]
    pub fn unsubscribe(&self, slot: SlotId, tag: &Hashtag) -> SessionResult<()> {
        let mut guard = self.occupied_slot(slot)?;
        guard.subscriptions.unsubscribe(tag)?;
        Ok(())
    }

    /// Take the oldest pending tweets for `slot` that fit in one timeline
    /// frame, or the "no messages" sentinel. The rest stay queued.
    #[track_caller]
    pub fn drain(&self, slot: SlotId) -> SessionResult<Vec<String>> {
        let mut guard = self.occupied_slot(slot)?;
        let stored = guard
            .queue
            .drain_within(TIMELINE_BUDGET, ResponseEnvelope::stored_tweet_len);

        let held = guard.queue.len();
        if held > 0 {
            debug!("Slot {} timeline full, {} tweets held back", slot, held);
        }
        Ok(stored)
    }

    /// Free `slot`, wiping its name, subscriptions and queue.
    /// Returns false if it was already free.
    pub(crate) fn release(&self, slot: SlotId) -> bool {
        let Some(cell) = self.inner.slots.get(slot.index()) else {
            return false;
        };

        let mut guard = cell.lock();
        let Some(username) = guard.username.take() else {
            return false;
        };
        guard.clear();
        drop(guard);

        info!("Released slot {} held by '{}'", slot, username);
        true
    }

    pub fn has_free_slot(&self) -> bool {
        self.inner.slots.iter().any(|cell| !cell.lock().is_occupied())
    }

    pub fn occupied_count(&self) -> usize {
        self.inner
            .slots
            .iter()
            .filter(|cell| cell.lock().is_occupied())
            .count()
    }

    pub fn capacity(&self) -> usize {
        self.inner.slots.len()
    }

    pub fn username(&self, slot: SlotId) -> Option<String> {
        self.inner
            .slots
            .get(slot.index())
            .and_then(|cell| cell.lock().username.clone())
    }

    /// Subscriptions of `slot` in the order they were added.
    pub fn subscriptions(&self, slot: SlotId) -> Vec<Hashtag> {
        self.inner
            .slots
            .get(slot.index())
            .map(|cell| cell.lock().subscriptions.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of tweets waiting for `slot`.
    pub fn pending_count(&self, slot: SlotId) -> usize {
        self.inner
            .slots
            .get(slot.index())
            .map(|cell| cell.lock().queue.len())
            .unwrap_or_default()
    }

    /// Validator configured with this registry's hashtag limits.
    pub fn hashtag_validator(&self) -> HashtagValidator {
        HashtagValidator::new(self.inner.limits.hashtag_rules)
    }

    pub(crate) fn slots(&self) -> &[Mutex<UserSlot>] {
        &self.inner.slots
    }

    #[track_caller]
    fn occupied_slot(
        &self,
        slot: SlotId,
    ) -> SessionResult<parking_lot::MutexGuard<'_, UserSlot>> {
        let not_occupied = || SessionError::SlotNotOccupied {
            slot,
            location: ErrorLocation::from(Location::caller()),
        };

        let guard = self
            .inner
            .slots
            .get(slot.index())
            .ok_or_else(not_occupied)?
            .lock();

        if !guard.is_occupied() {
            return Err(not_occupied());
        }
        Ok(guard)
    }

    #[track_caller]
    fn check_username(&self, username: &str) -> SessionResult<()> {
        let invalid = |message: String| {
            debug!("Rejected username {:?}: {}", username, message);
            SessionError::InvalidUsername {
                message,
                location: ErrorLocation::from(Location::caller()),
            }
        };

        if username.is_empty() {
            return Err(invalid(String::from("username cannot be empty")));
        }

        let max = self.inner.limits.max_username_len;
        if username.chars().count() > max {
            return Err(invalid(format!("username exceeds {max} characters")));
        }

        if username.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(invalid(String::from(
                "username cannot contain whitespace",
            )));
        }

        Ok(())
    }
}

impl Clone for UserRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
