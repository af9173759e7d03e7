//! A feature holding one value.

use std::sync::Arc;

use super::Modulable;
use crate::property::Property;
use crate::reducers::IntentReducer;
use crate::state::{ReducibleState, StateContainer};

#[derive(Debug, Clone, PartialEq)]
pub enum ValueIntent<V> {
    Update(V),
}

/// Stores a value and announces every update, equal or not.
pub struct ValueFeature<V> {
    container: StateContainer<V>,
}

impl<V: Clone + Send + 'static> ValueFeature<V> {
    pub fn new(value: V) -> Self {
        Self {
            container: StateContainer::new(value),
        }
    }
}

impl<V: Clone + Send + 'static> ReducibleState for ValueFeature<V> {
    type State = V;

    fn container(&self) -> &StateContainer<V> {
        &self.container
    }
}

impl<V: Clone + Send + 'static> IntentReducer for ValueFeature<V> {
    type Intent = ValueIntent<V>;

    fn reduce_intent(&self, intent: ValueIntent<V>) {
        match intent {
            ValueIntent::Update(value) => self.apply_make(|| value),
        }
    }
}

impl<V: Clone + Send + Sync + 'static> Modulable for ValueFeature<V> {
    type Value = V;

    fn value(self: &Arc<Self>) -> Property<V> {
        let (reader, writer) = (Arc::clone(self), Arc::clone(self));
        Property::new(
            move || reader.state(),
            move |value| writer.intent(ValueIntent::Update(value)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publisher::Publisher;
    use parking_lot::Mutex;

    #[test]
    fn update_notifies_even_when_equal() {
        let feature = ValueFeature::new(1);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let _subscription = feature
            .state_publisher()
            .sink(move |value| sink_seen.lock().push(value));

        feature.intent(ValueIntent::Update(1));
        feature.intent(ValueIntent::Update(2));
        assert_eq!(*seen.lock(), vec![1, 1, 2]);
    }

    #[test]
    fn property_routes_through_the_intent() {
        let feature = Arc::new(ValueFeature::new("x".to_string()));
        let property = feature.value();
        property.set("y".to_string());
        assert_eq!(feature.state(), "y");
        assert_eq!(property.get(), "y");
    }
}
