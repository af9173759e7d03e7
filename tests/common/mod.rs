//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use mvikit::publisher::{Completion, Publisher, Sink, Subscription};
use parking_lot::Mutex;
use std::sync::Arc;

/// Something a [`Recorder`] saw.
#[derive(Debug, Clone, PartialEq)]
pub enum Seen<T, E> {
    Value(T),
    Completed(Completion<E>),
}

/// Records everything delivered to its sinks, in order.
pub struct Recorder<T, E> {
    seen: Arc<Mutex<Vec<Seen<T, E>>>>,
}

impl<T, E> Clone for Recorder<T, E> {
    fn clone(&self) -> Self {
        Self {
            seen: Arc::clone(&self.seen),
        }
    }
}

impl<T, E> Recorder<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Subscribe a recording sink to `publisher`.
    pub fn attach<P>(&self, publisher: &P) -> Subscription
    where
        P: Publisher<Output = T, Failure = E> + ?Sized,
    {
        let on_value = Arc::clone(&self.seen);
        let on_completion = Arc::clone(&self.seen);
        publisher.subscribe(Sink::new(
            move |value| on_value.lock().push(Seen::Value(value)),
            move |completion| on_completion.lock().push(Seen::Completed(completion)),
        ))
    }

    pub fn values(&self) -> Vec<T> {
        self.seen
            .lock()
            .iter()
            .filter_map(|seen| match seen {
                Seen::Value(value) => Some(value.clone()),
                Seen::Completed(_) => None,
            })
            .collect()
    }

    pub fn seen(&self) -> Vec<Seen<T, E>> {
        self.seen.lock().clone()
    }
}

/// Collects messages pushed from any callback.
pub struct Log<M> {
    entries: Arc<Mutex<Vec<M>>>,
}

impl<M> Clone for Log<M> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<M: Clone> Log<M> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&self, entry: M) {
        self.entries.lock().push(entry);
    }

    pub fn entries(&self) -> Vec<M> {
        self.entries.lock().clone()
    }
}
