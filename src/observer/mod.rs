//! Subscription ownership and binding.
//!
//! A feature that reacts to the outside world owns a
//! [`SubscriptionRegistry`] and implements [`Observer`]. Its `bind*`
//! methods subscribe a transform that feeds one of the feature's dispatch
//! entry points and keep the resulting [`Subscription`] until
//! [`teardown`](Observer::teardown).
//!
//! ```text
//! upstream ──→ Path::extract ──→ Pipeline ──→ Dispatch ──→ reduce_*
//!                                                             │
//!                      downstream bindings ←── state / events ┘
//! ```
//!
//! The free functions [`bind`] and [`bind_feature`] do the same wiring but
//! return the handle instead of storing it.

mod binding;
mod registry;

pub use binding::{bind, bind_feature, Dispatch, Pipeline};
pub use registry::SubscriptionRegistry;

use crate::publisher::{Publisher, Subscription};
use crate::state::ReducibleState;

/// Something that owns subscriptions.
pub trait Observer {
    fn registry(&self) -> &SubscriptionRegistry;

    /// Keep `subscription` alive until teardown, or until its upstream
    /// completes.
    fn store(&self, subscription: Subscription) {
        self.registry().store(subscription);
    }

    /// Feed `publisher` through `pipeline` into `dispatch`. The subscription
    /// is stored and removed again once the upstream completes.
    fn bind<P, M>(
        &self,
        publisher: &P,
        pipeline: Pipeline<P::Output, P::Failure, M>,
        dispatch: Dispatch<M>,
    ) where
        P: Publisher + ?Sized,
        M: 'static,
    {
        self.store(bind(publisher, pipeline, dispatch));
    }

    /// Dispatch `transform(&state)` for each state change of `feature`.
    fn bind_feature<F, M, T>(&self, feature: &F, transform: T, dispatch: Dispatch<M>)
    where
        F: ReducibleState + ?Sized,
        M: 'static,
        T: Fn(&F::State) -> M + Send + Sync + 'static,
    {
        self.store(bind_feature(feature, transform, dispatch));
    }

    /// Re-announce a parent's state whenever `child` changes. `parent` is
    /// usually [`ReducibleState::renotifications`] of the parent feature.
    fn bind_child<F>(&self, child: &F, parent: Dispatch<()>)
    where
        F: ReducibleState + ?Sized,
    {
        self.bind_feature(child, |_| (), parent);
    }

    /// Cancel every stored subscription. Safe to call repeatedly.
    fn teardown(&self) {
        self.registry().teardown();
    }
}

impl Observer for SubscriptionRegistry {
    fn registry(&self) -> &SubscriptionRegistry {
        self
    }
}
