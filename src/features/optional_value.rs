//! A feature holding a value that may be absent.

use std::sync::Arc;

use super::Modulable;
use crate::property::Property;
use crate::reducers::IntentReducer;
use crate::state::{ReducibleState, StateContainer};

#[derive(Debug, Clone, PartialEq)]
pub enum OptionalValueIntent<V> {
    Update(Option<V>),
}

/// Stores an optional value. Updates equal to the current value are
/// ignored, so subscribers only hear about real changes.
pub struct OptionalValueFeature<V> {
    container: StateContainer<Option<V>>,
}

impl<V: Clone + PartialEq + Send + 'static> OptionalValueFeature<V> {
    pub fn new(value: Option<V>) -> Self {
        Self {
            container: StateContainer::new(value),
        }
    }
}

impl<V: Clone + PartialEq + Send + 'static> Default for OptionalValueFeature<V> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<V: Clone + PartialEq + Send + 'static> ReducibleState for OptionalValueFeature<V> {
    type State = Option<V>;

    fn container(&self) -> &StateContainer<Option<V>> {
        &self.container
    }
}

impl<V: Clone + PartialEq + Send + 'static> IntentReducer for OptionalValueFeature<V> {
    type Intent = OptionalValueIntent<V>;

    fn reduce_intent(&self, intent: OptionalValueIntent<V>) {
        match intent {
            OptionalValueIntent::Update(value) => {
                if value != self.state() {
                    self.apply_make(|| value);
                }
            }
        }
    }
}

impl<V: Clone + PartialEq + Send + Sync + 'static> Modulable for OptionalValueFeature<V> {
    type Value = Option<V>;

    fn value(self: &Arc<Self>) -> Property<Option<V>> {
        let (reader, writer) = (Arc::clone(self), Arc::clone(self));
        Property::new(
            move || reader.state(),
            move |value| writer.intent(OptionalValueIntent::Update(value)),
        )
    }
}
