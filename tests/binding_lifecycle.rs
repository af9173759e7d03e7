mod common;

use std::sync::Arc;

use common::Log;
use mvikit::features::{ValueFeature, ValueIntent};
use mvikit::{
    bind, bind_feature, Dispatch, IntentReducer, Observer, PassthroughSubject, Path, Pipeline,
    Publisher, ReducibleState, StateContainer, SubscriptionRegistry,
};

#[derive(Debug, Clone, PartialEq)]
enum Msg {
    Value(u32),
    Failed(String),
    Done,
}

fn logging_dispatch(log: &Log<Msg>) -> Dispatch<Msg> {
    let log = log.clone();
    Dispatch::new(move |msg| log.push(msg))
}

#[test]
fn upstream_failure_without_handler_is_dropped() {
    let upstream = PassthroughSubject::<u32, String>::new();
    let log = Log::new();
    let _subscription = bind(&upstream, Pipeline::new(Msg::Value), logging_dispatch(&log));

    upstream.send(1);
    upstream.fail("boom".to_string());
    upstream.send(2);

    assert_eq!(log.entries(), vec![Msg::Value(1)]);
}

#[test]
fn failure_and_completion_transforms_produce_messages() {
    let failing = PassthroughSubject::<u32, String>::new();
    let finishing = PassthroughSubject::<u32, String>::new();
    let log = Log::new();
    let _failing = bind(
        &failing,
        Pipeline::new(Msg::Value).on_fail(|error| Some(Msg::Failed(error))),
        logging_dispatch(&log),
    );
    let _finishing = bind(
        &finishing,
        Pipeline::new(Msg::Value).on_complete(|| Some(Msg::Done)),
        logging_dispatch(&log),
    );

    failing.fail("bad".to_string());
    finishing.finish();

    assert_eq!(log.entries(), vec![Msg::Failed("bad".to_string()), Msg::Done]);
}

#[test]
fn none_messages_are_no_ops() {
    let upstream = PassthroughSubject::<u32, String>::new();
    let log = Log::new();
    let _subscription = bind(
        &upstream,
        Pipeline::filter_map(|n: u32| (n % 2 == 0).then_some(Msg::Value(n)))
            .on_fail(|_| None),
        logging_dispatch(&log),
    );

    for n in 1..=4 {
        upstream.send(n);
    }
    upstream.fail("ignored".to_string());

    assert_eq!(log.entries(), vec![Msg::Value(2), Msg::Value(4)]);
}

#[test]
fn case_path_skips_other_alternatives() {
    #[derive(Debug, Clone)]
    enum Load {
        Loading,
        Loaded(u32),
    }

    let upstream = PassthroughSubject::<Load, String>::new();
    let log = Log::new();
    let loaded = Path::case(|load: &Load| match load {
        Load::Loaded(n) => Some(*n),
        Load::Loading => None,
    });
    let _subscription = bind(
        &upstream,
        Pipeline::extract(loaded, Msg::Value),
        logging_dispatch(&log),
    );

    upstream.send(Load::Loading);
    upstream.send(Load::Loaded(5));
    upstream.send(Load::Loading);

    assert_eq!(log.entries(), vec![Msg::Value(5)]);
}

#[test]
fn teardown_stops_bindings_and_is_idempotent() {
    let upstream = PassthroughSubject::<u32, String>::new();
    let registry = SubscriptionRegistry::new();
    let log = Log::new();
    registry.bind(&upstream, Pipeline::new(Msg::Value), logging_dispatch(&log));
    registry.bind(
        &upstream,
        Pipeline::new(|n: u32| Msg::Value(n * 10)),
        logging_dispatch(&log),
    );

    upstream.send(1);
    registry.teardown();
    upstream.send(2);
    registry.teardown();

    assert_eq!(log.entries(), vec![Msg::Value(1), Msg::Value(10)]);
    assert_eq!(upstream.subscriber_count(), 0);
}

#[test]
fn completed_bindings_leave_the_registry() {
    let upstream = PassthroughSubject::<u32, String>::new();
    let registry = SubscriptionRegistry::new();
    registry.bind(&upstream, Pipeline::new(Msg::Value), Dispatch::new(|_| {}));
    assert_eq!(registry.len(), 1);

    upstream.finish();
    assert!(registry.is_empty());
}

#[test]
fn bind_feature_fires_on_changes_only() {
    let feature = ValueFeature::new(1u32);
    let log = Log::new();
    let _subscription = bind_feature(&feature, |n: &u32| Msg::Value(*n), logging_dispatch(&log));

    assert!(log.entries().is_empty());
    feature.intent(ValueIntent::Update(2));
    assert_eq!(log.entries(), vec![Msg::Value(2)]);
}

#[test]
fn bound_features_update_depth_first() {
    let first = Arc::new(ValueFeature::new(0u32));
    let second = Arc::new(ValueFeature::new(0u32));
    let third = Arc::new(ValueFeature::new(0u32));
    let registry = SubscriptionRegistry::new();
    registry.bind_feature(
        first.as_ref(),
        |n: &u32| ValueIntent::Update(n + 1),
        second.intents(),
    );
    registry.bind_feature(
        second.as_ref(),
        |n: &u32| ValueIntent::Update(n * 2),
        third.intents(),
    );

    let seen_by_first_watcher = Log::new();
    let inspected = Arc::clone(&third);
    let log = seen_by_first_watcher.clone();
    registry.store(
        first
            .state_publisher()
            .changes()
            .sink(move |_| log.push(inspected.state())),
    );

    first.intent(ValueIntent::Update(4));

    assert_eq!(second.state(), 5);
    assert_eq!(third.state(), 10);
    assert_eq!(seen_by_first_watcher.entries(), vec![10]);
}

#[test]
fn bindings_do_not_keep_their_target_alive() {
    let upstream = PassthroughSubject::<u32, String>::new();
    let target = Arc::new(ValueFeature::new(0u32));
    let weak = Arc::downgrade(&target);
    let _subscription = bind(
        &upstream,
        Pipeline::new(ValueIntent::Update),
        target.intents(),
    );

    drop(target);
    assert!(weak.upgrade().is_none());
    upstream.send(3);
}

#[test]
fn dispatch_map_adapts_message_types() {
    let log = Log::new();
    let numbers: Dispatch<u32> = logging_dispatch(&log).map(Msg::Value);
    numbers.send(8);
    assert_eq!(log.entries(), vec![Msg::Value(8)]);
}

struct Form {
    container: StateContainer<String>,
    title: Arc<ValueFeature<String>>,
    registry: SubscriptionRegistry,
}

impl ReducibleState for Form {
    type State = String;

    fn container(&self) -> &StateContainer<String> {
        &self.container
    }
}

impl Observer for Form {
    fn registry(&self) -> &SubscriptionRegistry {
        &self.registry
    }
}

#[test]
fn child_changes_renotify_the_parent() {
    let form = Arc::new(Form {
        container: StateContainer::new("form".to_string()),
        title: Arc::new(ValueFeature::new(String::new())),
        registry: SubscriptionRegistry::new(),
    });
    form.bind_child(form.title.as_ref(), form.renotifications());

    let log = Log::new();
    let sink_log = log.clone();
    let _subscription = form
        .state_publisher()
        .changes()
        .sink(move |state: String| sink_log.push(state));

    form.title.intent(ValueIntent::Update("hello".to_string()));
    form.title.intent(ValueIntent::Update("hello!".to_string()));
    assert_eq!(log.entries(), vec!["form".to_string(), "form".to_string()]);

    form.teardown();
    form.title.intent(ValueIntent::Update("gone".to_string()));
    assert_eq!(log.entries().len(), 2);
}
