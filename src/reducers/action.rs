//! Action reducers: fallible work, optionally with a reaction.

use std::sync::Arc;

use async_trait::async_trait;

use crate::observer::Dispatch;
use crate::task::{spawn_detached, DispatchError, TaskHandle};

/// Synchronous, fallible state evolution.
///
/// Errors go back to whoever called [`action`](Self::action); nothing
/// retries them.
pub trait ActionReducer {
    type Action: Send + 'static;
    type Error: Send + 'static;

    fn reduce_action(&self, action: Self::Action) -> Result<(), Self::Error>;

    fn action(&self, action: Self::Action) -> Result<(), Self::Error> {
        self.reduce_action(action)
    }

    /// Entry point for bindings. A binding has no caller to return an error
    /// to, so failures are dropped.
    fn actions(self: &Arc<Self>) -> Dispatch<Self::Action>
    where
        Self: Sized + Send + Sync + 'static,
    {
        let weak = Arc::downgrade(self);
        Dispatch::new(move |action| {
            if let Some(this) = weak.upgrade() {
                if this.reduce_action(action).is_err() {
                    tracing::trace!("Bound action failed; error dropped");
                }
            }
        })
    }
}

/// Synchronous, fallible action that answers with a value.
pub trait ReactionReducer {
    type Action: Send + 'static;
    type Reaction;
    type Error;

    fn reduce_reaction(&self, action: Self::Action) -> Result<Self::Reaction, Self::Error>;

    fn react(&self, action: Self::Action) -> Result<Self::Reaction, Self::Error> {
        self.reduce_reaction(action)
    }

    /// Entry point for bindings; reaction and error are both discarded.
    fn reactions(self: &Arc<Self>) -> Dispatch<Self::Action>
    where
        Self: Sized + Send + Sync + 'static,
    {
        let weak = Arc::downgrade(self);
        Dispatch::new(move |action| {
            if let Some(this) = weak.upgrade() {
                if this.reduce_reaction(action).is_err() {
                    tracing::trace!("Bound reaction failed; error dropped");
                }
            }
        })
    }
}

/// Fallible action that may suspend and answers with a reaction.
///
/// Await [`action`](Self::action) to get the result. [`dispatch_action`](Self::dispatch_action)
/// is fire-and-forget: the reaction and any error are dropped, never
/// delivered anywhere.
#[async_trait]
pub trait AsyncActionReducer: Send + Sync + 'static {
    type Action: Send + 'static;
    type Reaction: Send + 'static;
    type Error: Send + 'static;

    async fn reduce_action(&self, action: Self::Action) -> Result<Self::Reaction, Self::Error>;

    async fn action(&self, action: Self::Action) -> Result<Self::Reaction, Self::Error> {
        self.reduce_action(action).await
    }

    fn dispatch_action(self: &Arc<Self>, action: Self::Action) -> Result<TaskHandle, DispatchError>
    where
        Self: Sized,
    {
        let this = Arc::clone(self);
        spawn_detached(async move {
            if this.reduce_action(action).await.is_err() {
                tracing::trace!("Detached action failed; error dropped");
            }
        })
    }

    fn detached_actions(self: &Arc<Self>) -> Dispatch<Self::Action>
    where
        Self: Sized,
    {
        let weak = Arc::downgrade(self);
        Dispatch::new(move |action| {
            if let Some(this) = weak.upgrade() {
                let _ = this.dispatch_action(action);
            }
        })
    }
}
