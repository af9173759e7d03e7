//! Intent reducers: state-changing requests with no result.

use std::sync::Arc;

use async_trait::async_trait;

use crate::observer::Dispatch;
use crate::task::{spawn_detached, DispatchError, TaskHandle};

/// Synchronous intent handling.
///
/// An intent typically mutates the feature's state or publishes an event.
pub trait IntentReducer {
    type Intent: Send + 'static;

    fn reduce_intent(&self, intent: Self::Intent);

    fn intent(&self, intent: Self::Intent) {
        self.reduce_intent(intent)
    }

    /// Entry point for bindings. Holds the feature weakly.
    fn intents(self: &Arc<Self>) -> Dispatch<Self::Intent>
    where
        Self: Sized + Send + Sync + 'static,
    {
        let weak = Arc::downgrade(self);
        Dispatch::new(move |intent| {
            if let Some(this) = weak.upgrade() {
                this.reduce_intent(intent);
            }
        })
    }
}

/// Intent handling that may suspend.
///
/// [`intent`](Self::intent) waits for the body; [`dispatch_intent`](Self::dispatch_intent)
/// runs it as detached work and returns at once.
#[async_trait]
pub trait AsyncIntentReducer: Send + Sync + 'static {
    type Intent: Send + 'static;

    async fn reduce_intent(&self, intent: Self::Intent);

    async fn intent(&self, intent: Self::Intent) {
        self.reduce_intent(intent).await
    }

    fn dispatch_intent(self: &Arc<Self>, intent: Self::Intent) -> Result<TaskHandle, DispatchError>
    where
        Self: Sized,
    {
        let this = Arc::clone(self);
        spawn_detached(async move { this.reduce_intent(intent).await })
    }

    /// Entry point for bindings; every message becomes a detached dispatch.
    fn detached_intents(self: &Arc<Self>) -> Dispatch<Self::Intent>
    where
        Self: Sized,
    {
        let weak = Arc::downgrade(self);
        Dispatch::new(move |intent| {
            if let Some(this) = weak.upgrade() {
                let _ = this.dispatch_intent(intent);
            }
        })
    }
}
