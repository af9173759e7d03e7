//! Subscription handles.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

/// Identity of one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Hook = Box<dyn FnOnce() + Send>;

/// Liveness shared by a subscription handle and its publisher entry.
pub(crate) struct Liveness {
    active: AtomicBool,
    on_completion: Mutex<Option<Hook>>,
}

impl Liveness {
    pub(crate) fn new(active: bool) -> Arc<Self> {
        Arc::new(Self {
            active: AtomicBool::new(active),
            on_completion: Mutex::new(None),
        })
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Mark ended. Returns true for the call that actually ended it.
    pub(crate) fn end(&self) -> bool {
        self.active.swap(false, Ordering::AcqRel)
    }

    /// Run the completion hook, if one is registered. Called by the
    /// publisher after the sink saw its terminal event.
    pub(crate) fn completed(&self) {
        let hook = self.on_completion.lock().take();
        if let Some(hook) = hook {
            hook();
        }
    }
}

/// Handle to one active binding between a publisher and a sink.
///
/// Cancelling is idempotent. Dropping the handle cancels it, so a
/// subscription lives exactly as long as whoever owns the handle - usually
/// a [`SubscriptionRegistry`](crate::observer::SubscriptionRegistry).
pub struct Subscription {
    id: SubscriptionId,
    liveness: Arc<Liveness>,
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub(crate) fn new<F>(id: SubscriptionId, liveness: Arc<Liveness>, detach: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            id,
            liveness,
            detach: Some(Box::new(detach)),
        }
    }

    /// Handle for a subscription that ended before it was handed out
    /// (subscribing to an already completed publisher).
    pub(crate) fn finished() -> Self {
        Self {
            id: SubscriptionId::new(),
            liveness: Liveness::new(false),
            detach: None,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// False once cancelled or once the upstream completed.
    pub fn is_active(&self) -> bool {
        self.liveness.is_active()
    }

    /// Register `hook` to run once the upstream completes. Replaces any
    /// earlier hook. Cancelling never runs it.
    pub(crate) fn on_completion<F>(&self, hook: F)
    where
        F: FnOnce() + Send + 'static,
    {
        *self.liveness.on_completion.lock() = Some(Box::new(hook));
    }

    /// Stop delivery and detach from the publisher.
    pub fn cancel(&mut self) {
        self.liveness.end();
        self.liveness.on_completion.lock().take();
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
