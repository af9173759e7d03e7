mod common;

use std::sync::Arc;

use common::{Log, Recorder};
use mvikit::features::{
    ListFeature, ListIntent, Modulable, PagerFeature, PagerIntent, PagerState, ValueFeature,
    ValueIntent,
};
use mvikit::mvi::{ImmutableReducer, Intent, ReducerStore, UiState};
use mvikit::publisher::Never;
use mvikit::{
    ActionReducer, IntentReducer, Observer, Path, Pipeline, Property, ReducibleState,
};

#[derive(Debug, Clone, PartialEq, Default)]
enum Door {
    #[default]
    Closed,
    Open,
    Locked,
}

impl UiState for Door {}

#[derive(Debug)]
enum DoorIntent {
    Open,
    Close,
    Lock,
}

impl Intent for DoorIntent {}

#[derive(Debug, Clone, PartialEq)]
enum DoorError {
    IsLocked,
    IsOpen,
}

struct DoorReducer;

impl ImmutableReducer for DoorReducer {
    type State = Door;
    type Intent = DoorIntent;
    type Error = DoorError;

    fn reduce(state: Door, intent: DoorIntent) -> Result<Door, DoorError> {
        match (state, intent) {
            (Door::Locked, DoorIntent::Open) => Err(DoorError::IsLocked),
            (Door::Open, DoorIntent::Lock) => Err(DoorError::IsOpen),
            (_, DoorIntent::Open) => Ok(Door::Open),
            (Door::Locked, DoorIntent::Close) => Ok(Door::Locked),
            (_, DoorIntent::Close) => Ok(Door::Closed),
            (_, DoorIntent::Lock) => Ok(Door::Locked),
        }
    }
}

#[test]
fn pure_reducer_is_callable_without_a_store() {
    assert_eq!(DoorReducer::call(Door::Closed, DoorIntent::Open), Ok(Door::Open));
    assert_eq!(
        DoorReducer::call(Door::Locked, DoorIntent::Open),
        Err(DoorError::IsLocked)
    );
}

#[test]
fn store_applies_only_real_changes() {
    let store = ReducerStore::<DoorReducer>::default();
    let recorder = Recorder::<Door, Never>::new();
    let _subscription = recorder.attach(&store.state_publisher().changes());

    store.action(DoorIntent::Close).unwrap();
    store.action(DoorIntent::Lock).unwrap();
    assert_eq!(store.action(DoorIntent::Open), Err(DoorError::IsLocked));
    store.action(DoorIntent::Close).unwrap();

    assert_eq!(store.state(), Door::Locked);
    assert_eq!(recorder.values(), vec![Door::Locked]);
}

#[test]
fn store_accepts_bound_intents() {
    let door = Arc::new(ReducerStore::<DoorReducer>::new(Door::Closed));
    let toggle = Arc::new(ValueFeature::new(false));
    door.bind_feature(
        toggle.as_ref(),
        |open: &bool| if *open { DoorIntent::Open } else { DoorIntent::Close },
        door.actions(),
    );

    toggle.intent(ValueIntent::Update(true));
    assert_eq!(door.state(), Door::Open);

    toggle.intent(ValueIntent::Update(false));
    assert_eq!(door.state(), Door::Closed);

    door.teardown();
    toggle.intent(ValueIntent::Update(true));
    assert_eq!(door.state(), Door::Closed);
}

#[test]
fn pager_follows_a_bound_offset() {
    #[derive(Debug, Clone, PartialEq)]
    struct Scroll {
        offset: usize,
    }

    let scroll = Arc::new(ValueFeature::new(Scroll { offset: 0 }));
    let pager = Arc::new(PagerFeature::new(PagerState::new(1, 5, 10)));
    let registry = mvikit::SubscriptionRegistry::new();
    registry.bind(
        &scroll.state_publisher().changes(),
        Pipeline::extract(Path::field(|scroll: &Scroll| scroll.offset), PagerIntent::UpdateBy),
        pager.intents(),
    );

    for offset in [3, 9, 10, 15, 25] {
        scroll.intent(ValueIntent::Update(Scroll { offset }));
    }

    assert_eq!(pager.state().current_page, 3);
    assert_eq!(pager.value().get().max_pages, 5);
}

#[test]
fn list_mirrors_children_and_exposes_items() {
    let list = ListFeature::new(vec!["a", "b"]);
    let log = Log::new();
    let sink_log = log.clone();
    let _subscription = mvikit::bind_feature(
        list.as_ref(),
        |state| state.selected,
        mvikit::Dispatch::new(move |selected| sink_log.push(selected)),
    );

    list.intent(ListIntent::Select(Some("b")));
    list.intent(ListIntent::SetItems(vec!["a", "b", "c"]));
    list.intent(ListIntent::Select(None));

    assert_eq!(log.entries(), vec![Some("b"), Some("b"), None]);
    assert_eq!(list.value().get(), vec!["a", "b", "c"]);
}

#[test]
fn property_overrides_keep_the_other_half() {
    let feature = Arc::new(ValueFeature::new(10));
    let writes = Log::new();
    let write_log = writes.clone();

    let doubled: Property<i32> = feature.value().with_get({
        let feature = Arc::clone(&feature);
        move || feature.state() * 2
    });
    doubled.set(4);
    assert_eq!(doubled.get(), 8);

    let logged = feature.value().with_set(move |value| write_log.push(value));
    logged.set(99);
    assert_eq!(logged.get(), 4);
    assert_eq!(writes.entries(), vec![99]);
}
