/// Returned by [`PendingQueue::drain`] when nothing is waiting.
pub const NO_MESSAGES: &str = "No new tweets";

/// Fixed-capacity FIFO of rendered tweets waiting for one user.
///
/// Storage is allocated once and never grows. An empty slot is `None`.
#[derive(Debug, Clone)]
pub struct PendingQueue {
    slots: Box<[Option<String>]>,
}

impl PendingQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
        }
    }

    /// Store `item` in the first empty slot. Returns `false` and drops the
    /// item when every slot is taken.
    pub fn enqueue(&mut self, item: String) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(item);
                true
            }
            None => false,
        }
    }

    /// Take every stored item in insertion order, leaving the queue empty.
    /// An empty queue yields the single [`NO_MESSAGES`] sentinel.
    pub fn drain(&mut self) -> Vec<String> {
        self.drain_within(usize::MAX, |_| 0)
    }

    /// Like [`drain`](Self::drain), but stops before the summed `cost` of
    /// the taken items would exceed `budget`. The oldest item is always
    /// taken. Whatever is left moves to the front and keeps its order.
    pub fn drain_within<F>(&mut self, budget: usize, cost: F) -> Vec<String>
    where
        F: Fn(&str) -> usize,
    {
        let items: Vec<String> = self
            .slots
            .iter_mut()
            .filter_map(Option::take)
            .collect();

        let mut taken = Vec::with_capacity(items.len());
        let mut held = Vec::new();
        let mut spent = 0usize;
        for item in items {
            let next = spent.saturating_add(cost(&item));
            if held.is_empty() && (taken.is_empty() || next <= budget) {
                spent = next;
                taken.push(item);
            } else {
                held.push(item);
            }
        }

        for (slot, item) in self.slots.iter_mut().zip(held) {
            *slot = Some(item);
        }

        if taken.is_empty() {
            vec![String::from(NO_MESSAGES)]
        } else {
            taken
        }
    }

    /// Discard everything without returning it.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
