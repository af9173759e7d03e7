//! Event reducers: one-shot notifications decoupled from state.

use std::sync::Arc;

use crate::observer::Dispatch;
use crate::publisher::PassthroughSubject;

/// A feature that publishes events on its own stream.
///
/// Publishing never touches state. Presentation code subscribes to
/// [`publisher`](Self::publisher) for things like transient alerts.
pub trait EventReducer {
    type Event: Clone + Send + 'static;

    fn publisher(&self) -> &PassthroughSubject<Self::Event>;

    fn publish(&self, event: Self::Event) {
        self.publisher().send(event)
    }

    /// Entry point for bindings that turn upstream values into events.
    fn events(self: &Arc<Self>) -> Dispatch<Self::Event>
    where
        Self: Sized + Send + Sync + 'static,
    {
        let weak = Arc::downgrade(self);
        Dispatch::new(move |event| {
            if let Some(this) = weak.upgrade() {
                this.publish(event);
            }
        })
    }
}
