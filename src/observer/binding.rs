//! Wiring upstream streams into reducer entry points.

use std::fmt;
use std::sync::Arc;

use crate::path::Path;
use crate::publisher::{Completion, Publisher, Sink, Subscription};
use crate::state::ReducibleState;

type ValueFn<O, M> = Arc<dyn Fn(O) -> Option<M> + Send + Sync>;
type FailFn<E, M> = Arc<dyn Fn(E) -> Option<M> + Send + Sync>;
type CompleteFn<M> = Arc<dyn Fn() -> Option<M> + Send + Sync>;

/// A reducer's entry point for one message type.
///
/// Reducer traits hand these out (`intents()`, `actions()`, ...). Those
/// constructors hold the feature weakly, so a binding never keeps its
/// target alive; once the feature is gone messages fall on the floor.
pub struct Dispatch<M> {
    send: Arc<dyn Fn(M) + Send + Sync>,
}

impl<M> Clone for Dispatch<M> {
    fn clone(&self) -> Self {
        Self {
            send: Arc::clone(&self.send),
        }
    }
}

impl<M: 'static> Dispatch<M> {
    pub fn new<F>(send: F) -> Self
    where
        F: Fn(M) + Send + Sync + 'static,
    {
        Self {
            send: Arc::new(send),
        }
    }

    pub fn send(&self, message: M) {
        tracing::trace!(message = std::any::type_name::<M>(), "Dispatching message");
        (self.send)(message)
    }

    /// Accept `N` by converting it into `M` first.
    pub fn map<N, F>(self, convert: F) -> Dispatch<N>
    where
        N: 'static,
        F: Fn(N) -> M + Send + Sync + 'static,
    {
        Dispatch::new(move |message| self.send(convert(message)))
    }
}

impl<M> fmt::Debug for Dispatch<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dispatch<{}>", std::any::type_name::<M>())
    }
}

/// How an upstream's values, failure and completion become messages.
///
/// A transform that yields `None` makes that event a no-op. Without an
/// [`on_fail`](Self::on_fail) transform an upstream failure is dropped
/// silently; the same goes for completion.
pub struct Pipeline<O, E, M> {
    on_value: ValueFn<O, M>,
    on_fail: Option<FailFn<E, M>>,
    on_complete: Option<CompleteFn<M>>,
}

impl<O: 'static, E: 'static, M: 'static> Pipeline<O, E, M> {
    /// Every value becomes a message.
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(O) -> M + Send + Sync + 'static,
    {
        Self::filter_map(move |value| Some(transform(value)))
    }

    /// Values that map to `None` are skipped.
    pub fn filter_map<F>(transform: F) -> Self
    where
        F: Fn(O) -> Option<M> + Send + Sync + 'static,
    {
        Self {
            on_value: Arc::new(transform),
            on_fail: None,
            on_complete: None,
        }
    }

    /// Extract through `path` first; values the path misses are skipped.
    pub fn extract<V, F>(path: Path<O, V>, transform: F) -> Self
    where
        V: 'static,
        F: Fn(V) -> M + Send + Sync + 'static,
    {
        Self::filter_map(move |value| path.extract(&value).map(&transform))
    }

    pub fn on_fail<F>(mut self, transform: F) -> Self
    where
        F: Fn(E) -> Option<M> + Send + Sync + 'static,
    {
        self.on_fail = Some(Arc::new(transform));
        self
    }

    pub fn on_complete<F>(mut self, transform: F) -> Self
    where
        F: Fn() -> Option<M> + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(transform));
        self
    }
}

/// Feed `publisher` through `pipeline` into `dispatch`, handing the
/// subscription back to the caller.
pub fn bind<P, M>(
    publisher: &P,
    pipeline: Pipeline<P::Output, P::Failure, M>,
    dispatch: Dispatch<M>,
) -> Subscription
where
    P: Publisher + ?Sized,
    M: 'static,
{
    let Pipeline {
        on_value,
        on_fail,
        on_complete,
    } = pipeline;
    let value_dispatch = dispatch.clone();

    publisher.subscribe(Sink::new(
        move |value| {
            if let Some(message) = on_value(value) {
                value_dispatch.send(message);
            }
        },
        move |completion| {
            let message = match completion {
                Completion::Finished => on_complete.as_ref().and_then(|transform| transform()),
                Completion::Failure(error) => match &on_fail {
                    Some(transform) => transform(error),
                    None => {
                        tracing::trace!("Upstream failure dropped: no failure transform");
                        None
                    }
                },
            };
            if let Some(message) = message {
                dispatch.send(message);
            }
        },
    ))
}

/// Turn each state change of `feature` into a message. Fires once per
/// change; the value current at bind time is not dispatched.
pub fn bind_feature<F, M, T>(feature: &F, transform: T, dispatch: Dispatch<M>) -> Subscription
where
    F: ReducibleState + ?Sized,
    M: 'static,
    T: Fn(&F::State) -> M + Send + Sync + 'static,
{
    feature
        .state_publisher()
        .changes()
        .sink(move |state| dispatch.send(transform(&state)))
}
