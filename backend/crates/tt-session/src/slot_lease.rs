use crate::{SlotId, UserRegistry};

use log::debug;

/// Ownership of an occupied slot for the lifetime of one connection.
///
/// Dropping the lease frees the slot, so a connection that ends for any
/// reason gives its name back.
pub struct SlotLease {
    registry: UserRegistry,
    slot: SlotId,
    username: String,
}

impl SlotLease {
    pub(crate) fn new(registry: UserRegistry, slot: SlotId, username: &str) -> Self {
        Self {
            registry,
            slot,
            username: String::from(username),
        }
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Free the slot now instead of at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for SlotLease {
    fn drop(&mut self) {
        if self.registry.release(self.slot) {
            debug!("Lease for '{}' (slot {}) returned", self.username, self.slot);
        }
    }
}

impl std::fmt::Debug for SlotLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotLease")
            .field("slot", &self.slot)
            .field("username", &self.username)
            .finish()
    }
}
