//! Effect reducers: side effects with no state coupling.

use std::sync::Arc;

use async_trait::async_trait;

use crate::observer::Dispatch;
use crate::task::{spawn_detached, DispatchError, TaskHandle};

pub trait EffectReducer {
    type Effect: Send + 'static;

    fn reduce_effect(&self, effect: Self::Effect);

    fn effect(&self, effect: Self::Effect) {
        self.reduce_effect(effect)
    }

    fn effects(self: &Arc<Self>) -> Dispatch<Self::Effect>
    where
        Self: Sized + Send + Sync + 'static,
    {
        let weak = Arc::downgrade(self);
        Dispatch::new(move |effect| {
            if let Some(this) = weak.upgrade() {
                this.reduce_effect(effect);
            }
        })
    }
}

#[async_trait]
pub trait AsyncEffectReducer: Send + Sync + 'static {
    type Effect: Send + 'static;

    async fn reduce_effect(&self, effect: Self::Effect);

    async fn effect(&self, effect: Self::Effect) {
        self.reduce_effect(effect).await
    }

    fn dispatch_effect(self: &Arc<Self>, effect: Self::Effect) -> Result<TaskHandle, DispatchError>
    where
        Self: Sized,
    {
        let this = Arc::clone(self);
        spawn_detached(async move { this.reduce_effect(effect).await })
    }

    fn detached_effects(self: &Arc<Self>) -> Dispatch<Self::Effect>
    where
        Self: Sized,
    {
        let weak = Arc::downgrade(self);
        Dispatch::new(move |effect| {
            if let Some(this) = weak.upgrade() {
                let _ = this.dispatch_effect(effect);
            }
        })
    }
}
