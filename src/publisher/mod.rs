//! Push-based streams with synchronous delivery.
//!
//! A [`Publisher`] hands every value to its subscribers on the caller's
//! stack: `send` returns only after each live [`Sink`] has run. This is the
//! transport underneath state containers, event publishers and bindings.
//!
//! - [`PassthroughSubject`] - multicast without memory, used for events.
//! - [`CurrentValueSubject`] - remembers the latest value and replays it to
//!   new subscribers, used for state.
//! - [`StateStream`] - read-only view of a current-value subject, handed to
//!   observers of a state container.
//! - [`forward_stream`] - drives a `futures_core::Stream` into a subject.

mod stream;
mod subject;
mod subscription;

pub use stream::forward_stream;
pub use subject::{Changes, CurrentValueSubject, PassthroughSubject, StateStream};
pub use subscription::{Subscription, SubscriptionId};

/// Failure type of streams that cannot fail.
pub type Never = std::convert::Infallible;

/// How a stream ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<E> {
    /// The upstream finished normally.
    Finished,
    /// The upstream terminated with an error.
    Failure(E),
}

/// Receiving end of a subscription.
pub struct Sink<T, E> {
    receive_value: Box<dyn Fn(T) + Send + Sync>,
    receive_completion: Box<dyn Fn(Completion<E>) + Send + Sync>,
}

impl<T, E> Sink<T, E> {
    pub fn new<V, C>(receive_value: V, receive_completion: C) -> Self
    where
        V: Fn(T) + Send + Sync + 'static,
        C: Fn(Completion<E>) + Send + Sync + 'static,
    {
        Self {
            receive_value: Box::new(receive_value),
            receive_completion: Box::new(receive_completion),
        }
    }

    /// A sink that only cares about values; completion is ignored.
    pub fn values<V>(receive_value: V) -> Self
    where
        V: Fn(T) + Send + Sync + 'static,
    {
        Self::new(receive_value, |_| {})
    }

    pub(crate) fn receive(&self, value: T) {
        (self.receive_value)(value)
    }

    pub(crate) fn complete(&self, completion: Completion<E>) {
        (self.receive_completion)(completion)
    }
}

/// Anything that can be subscribed to.
pub trait Publisher {
    type Output: Clone + Send + 'static;
    type Failure: Clone + Send + 'static;

    /// Attach a sink. Delivery stops when the returned handle is cancelled
    /// or dropped, or when the publisher completes.
    fn subscribe(&self, sink: Sink<Self::Output, Self::Failure>) -> Subscription;

    /// Shorthand for subscribing with a value-only sink.
    fn sink<F>(&self, receive_value: F) -> Subscription
    where
        F: Fn(Self::Output) + Send + Sync + 'static,
    {
        self.subscribe(Sink::values(receive_value))
    }
}
