//! A feature driven by a pure reducer.

use std::marker::PhantomData;

use super::reducer::ImmutableReducer;
use crate::observer::{Observer, SubscriptionRegistry};
use crate::reducers::ActionReducer;
use crate::state::{ReducibleState, StateContainer};

/// Hosts an [`ImmutableReducer`] behind a state container.
///
/// Each intent runs the reducer on a copy of the current state. On success
/// the result is applied and announced; on error the state is left as it
/// was and the error goes back to the caller.
pub struct ReducerStore<R: ImmutableReducer> {
    container: StateContainer<R::State>,
    registry: SubscriptionRegistry,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: ImmutableReducer> ReducerStore<R> {
    pub fn new(initial: R::State) -> Self {
        Self {
            container: StateContainer::new(initial),
            registry: SubscriptionRegistry::new(),
            _reducer: PhantomData,
        }
    }
}

impl<R: ImmutableReducer> Default for ReducerStore<R> {
    fn default() -> Self {
        Self::new(R::State::default())
    }
}

impl<R: ImmutableReducer> ReducibleState for ReducerStore<R> {
    type State = R::State;

    fn container(&self) -> &StateContainer<R::State> {
        &self.container
    }
}

impl<R: ImmutableReducer> Observer for ReducerStore<R> {
    fn registry(&self) -> &SubscriptionRegistry {
        &self.registry
    }
}

impl<R: ImmutableReducer> ActionReducer for ReducerStore<R> {
    type Action = R::Intent;
    type Error = R::Error;

    fn reduce_action(&self, action: R::Intent) -> Result<(), R::Error> {
        let next = R::call(self.container.state(), action)?;
        if next != self.container.state() {
            self.container.apply_make(|| next);
        }
        Ok(())
    }
}
