//! Page tracking for incrementally loaded lists.

use std::sync::Arc;

use super::Modulable;
use crate::property::Property;
use crate::reducers::IntentReducer;
use crate::state::{ReducibleState, StateContainer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PagerState {
    pub current_page: usize,
    pub max_pages: usize,
    pub items_per_page: usize,
}

impl PagerState {
    pub fn new(current_page: usize, max_pages: usize, items_per_page: usize) -> Self {
        Self {
            current_page,
            max_pages,
            items_per_page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerIntent {
    /// The consumer reached item `offset`.
    UpdateBy(usize),
}

/// Advances one page at a time as the consumer scrolls past page
/// boundaries.
pub struct PagerFeature {
    container: StateContainer<PagerState>,
}

impl PagerFeature {
    pub fn new(state: PagerState) -> Self {
        Self {
            container: StateContainer::new(state),
        }
    }
}

impl Default for PagerFeature {
    fn default() -> Self {
        Self::new(PagerState::default())
    }
}

impl ReducibleState for PagerFeature {
    type State = PagerState;

    fn container(&self) -> &StateContainer<PagerState> {
        &self.container
    }
}

impl IntentReducer for PagerFeature {
    type Intent = PagerIntent;

    fn reduce_intent(&self, intent: PagerIntent) {
        match intent {
            PagerIntent::UpdateBy(offset) => {
                let state = self.state();
                if state.items_per_page == 0 {
                    return;
                }
                let reached = offset / state.items_per_page + 1;
                if state.current_page < reached {
                    self.apply_update(|state| state.current_page += 1);
                }
            }
        }
    }
}

impl Modulable for PagerFeature {
    type Value = PagerState;

    fn value(self: &Arc<Self>) -> Property<PagerState> {
        Property::from_state(self)
    }
}
