//! Ownership of a feature's live subscriptions.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::publisher::{Subscription, SubscriptionId};

type Entries = Mutex<HashMap<SubscriptionId, Subscription>>;

/// Every subscription one feature instance holds.
///
/// Subscriptions stored here stay alive until they complete upstream (then
/// each one removes itself), are cancelled by id, or the registry is torn
/// down or dropped.
#[derive(Default)]
pub struct SubscriptionRegistry {
    entries: Arc<Entries>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `subscription`. A subscription that already ended
    /// is dropped on the spot.
    pub fn store(&self, subscription: Subscription) {
        if !subscription.is_active() {
            return;
        }
        let id = subscription.id();
        let weak: Weak<Entries> = Arc::downgrade(&self.entries);
        subscription.on_completion(move || {
            if let Some(entries) = weak.upgrade() {
                let removed = entries.lock().remove(&id);
                drop(removed);
            }
        });
        let ended = {
            let mut entries = self.entries.lock();
            entries.insert(id, subscription);
            // Completed on another thread before the insert landed.
            match entries.get(&id) {
                Some(stored) if !stored.is_active() => entries.remove(&id),
                _ => None,
            }
        };
        drop(ended);
    }

    /// Cancel one subscription. Returns false when it was not held here.
    pub fn cancel(&self, id: SubscriptionId) -> bool {
        let removed = self.entries.lock().remove(&id);
        removed.is_some()
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.entries.lock().contains_key(&id)
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cancel everything in one sweep. Calling it again is a no-op.
    pub fn teardown(&self) {
        let drained = std::mem::take(&mut *self.entries.lock());
        if drained.is_empty() {
            return;
        }
        let count = drained.len();
        // Dropping cancels; done outside the lock.
        drop(drained);
        tracing::debug!(cancelled = count, "Subscription registry torn down");
    }
}

impl std::fmt::Debug for SubscriptionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionRegistry")
            .field("subscriptions", &self.entries.lock().len())
            .finish()
    }
}
