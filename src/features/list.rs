//! A list with an optional selection, composed from two child features.

use std::sync::Arc;

use super::{Modulable, OptionalValueFeature, OptionalValueIntent, ValueFeature, ValueIntent};
use crate::observer::{Dispatch, Observer, SubscriptionRegistry};
use crate::property::Property;
use crate::reducers::IntentReducer;
use crate::state::{ReducibleState, StateContainer};

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<V> {
    pub items: Vec<V>,
    pub selected: Option<V>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListIntent<V> {
    SetItems(Vec<V>),
    Select(Option<V>),
}

/// Items and selection live in child features; the list mirrors both into
/// its own state through bindings, so one subscription sees either change.
pub struct ListFeature<V> {
    items: Arc<ValueFeature<Vec<V>>>,
    selected: Arc<OptionalValueFeature<V>>,
    container: StateContainer<ListState<V>>,
    registry: SubscriptionRegistry,
}

impl<V> ListFeature<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(items: Vec<V>) -> Arc<Self> {
        Self::with_selection(items, None)
    }

    pub fn with_selection(items: Vec<V>, selected: Option<V>) -> Arc<Self> {
        let list = Arc::new(Self {
            container: StateContainer::new(ListState {
                items: items.clone(),
                selected: selected.clone(),
            }),
            items: Arc::new(ValueFeature::new(items)),
            selected: Arc::new(OptionalValueFeature::new(selected)),
            registry: SubscriptionRegistry::new(),
        });

        let weak = Arc::downgrade(&list);
        list.bind_feature(
            list.items.as_ref(),
            |items: &Vec<V>| items.clone(),
            Dispatch::new(move |items| {
                if let Some(list) = weak.upgrade() {
                    list.container.apply_update(|state| state.items = items);
                }
            }),
        );

        let weak = Arc::downgrade(&list);
        list.bind_feature(
            list.selected.as_ref(),
            |selected: &Option<V>| selected.clone(),
            Dispatch::new(move |selected| {
                if let Some(list) = weak.upgrade() {
                    list.container.apply_update(|state| state.selected = selected);
                }
            }),
        );

        list
    }

    pub fn items(&self) -> &Arc<ValueFeature<Vec<V>>> {
        &self.items
    }

    pub fn selected(&self) -> &Arc<OptionalValueFeature<V>> {
        &self.selected
    }
}

impl<V> ReducibleState for ListFeature<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    type State = ListState<V>;

    fn container(&self) -> &StateContainer<ListState<V>> {
        &self.container
    }
}

impl<V> Observer for ListFeature<V> {
    fn registry(&self) -> &SubscriptionRegistry {
        &self.registry
    }
}

impl<V> IntentReducer for ListFeature<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    type Intent = ListIntent<V>;

    fn reduce_intent(&self, intent: ListIntent<V>) {
        match intent {
            ListIntent::SetItems(items) => self.items.intent(ValueIntent::Update(items)),
            ListIntent::Select(selected) => {
                self.selected.intent(OptionalValueIntent::Update(selected))
            }
        }
    }
}

impl<V> Modulable for ListFeature<V>
where
    V: Clone + PartialEq + Send + Sync + 'static,
{
    type Value = Vec<V>;

    fn value(self: &Arc<Self>) -> Property<Vec<V>> {
        self.items.value()
    }
}
