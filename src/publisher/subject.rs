//! Subjects: publishers you can push into.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::subscription::Liveness;
use super::{Completion, Never, Publisher, Sink, Subscription, SubscriptionId};

struct Entry<T, E> {
    id: SubscriptionId,
    liveness: Arc<Liveness>,
    sink: Arc<Sink<T, E>>,
}

struct BroadcastInner<T, E> {
    entries: Vec<Entry<T, E>>,
    completion: Option<Completion<E>>,
}

/// Subscriber list shared by both subject kinds.
///
/// The lock is only held to copy the list out; sinks always run unlocked so
/// they may subscribe, cancel or send again from inside a delivery.
struct Broadcast<T, E> {
    inner: Arc<Mutex<BroadcastInner<T, E>>>,
}

impl<T, E> Clone for Broadcast<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> Broadcast<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BroadcastInner {
                entries: Vec::new(),
                completion: None,
            })),
        }
    }

    /// Register a sink. Returns the sink back when the broadcast already
    /// completed so the caller can deliver the terminal event.
    fn attach(&self, sink: Sink<T, E>) -> Result<(Subscription, Arc<Sink<T, E>>), Completion<E>> {
        let mut inner = self.inner.lock();
        if let Some(completion) = inner.completion.clone() {
            drop(inner);
            sink.complete(completion.clone());
            return Err(completion);
        }

        let id = SubscriptionId::new();
        let liveness = Liveness::new(true);
        let sink = Arc::new(sink);
        inner.entries.push(Entry {
            id,
            liveness: Arc::clone(&liveness),
            sink: Arc::clone(&sink),
        });

        let weak: Weak<Mutex<BroadcastInner<T, E>>> = Arc::downgrade(&self.inner);
        let subscription = Subscription::new(id, liveness, move || {
            if let Some(inner) = weak.upgrade() {
                inner.lock().entries.retain(|entry| entry.id != id);
            }
        });
        Ok((subscription, sink))
    }

    fn send(&self, value: T) {
        let targets: Vec<(Arc<Liveness>, Arc<Sink<T, E>>)> = {
            let inner = self.inner.lock();
            if inner.completion.is_some() {
                return;
            }
            inner
                .entries
                .iter()
                .map(|entry| (Arc::clone(&entry.liveness), Arc::clone(&entry.sink)))
                .collect()
        };

        for (liveness, sink) in targets {
            // Cancelled by an earlier sink during this same delivery.
            if liveness.is_active() {
                sink.receive(value.clone());
            }
        }
    }

    fn complete(&self, completion: Completion<E>) {
        let entries = {
            let mut inner = self.inner.lock();
            if inner.completion.is_some() {
                return;
            }
            inner.completion = Some(completion.clone());
            std::mem::take(&mut inner.entries)
        };

        for entry in entries {
            if entry.liveness.end() {
                entry.sink.complete(completion.clone());
                entry.liveness.completed();
            }
        }
    }

    fn subscriber_count(&self) -> usize {
        self.inner.lock().entries.len()
    }

    fn is_completed(&self) -> bool {
        self.inner.lock().completion.is_some()
    }
}

/// A multicast publisher without memory.
///
/// Subscribers only see values sent after they subscribed. Cloning yields
/// another handle to the same subject.
pub struct PassthroughSubject<T, E = Never> {
    broadcast: Broadcast<T, E>,
}

impl<T, E> Clone for PassthroughSubject<T, E> {
    fn clone(&self) -> Self {
        Self {
            broadcast: self.broadcast.clone(),
        }
    }
}

impl<T, E> Default for PassthroughSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> PassthroughSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            broadcast: Broadcast::new(),
        }
    }

    /// Deliver `value` to every live subscriber before returning.
    /// Ignored once the subject has completed.
    pub fn send(&self, value: T) {
        self.broadcast.send(value);
    }

    /// Finish the stream normally.
    pub fn finish(&self) {
        self.broadcast.complete(Completion::Finished);
    }

    /// Terminate the stream with an error.
    pub fn fail(&self, error: E) {
        self.broadcast.complete(Completion::Failure(error));
    }

    pub fn subscriber_count(&self) -> usize {
        self.broadcast.subscriber_count()
    }

    pub fn is_completed(&self) -> bool {
        self.broadcast.is_completed()
    }

    /// True when both handles refer to the same subject.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.broadcast.inner, &other.broadcast.inner)
    }
}

impl<T, E> Publisher for PassthroughSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    type Output = T;
    type Failure = E;

    fn subscribe(&self, sink: Sink<T, E>) -> Subscription {
        match self.broadcast.attach(sink) {
            Ok((subscription, _)) => subscription,
            Err(_) => Subscription::finished(),
        }
    }
}

impl<T, E> fmt::Debug for PassthroughSubject<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.broadcast.inner.lock();
        f.debug_struct("PassthroughSubject")
            .field("subscribers", &inner.entries.len())
            .field("completed", &inner.completion.is_some())
            .finish()
    }
}

/// A publisher that always holds a current value.
///
/// New subscribers immediately receive the current value, then every later
/// one. `send` stores the value before notifying, so a subscriber that reads
/// [`value`](Self::value) from inside its callback sees what it was handed.
pub struct CurrentValueSubject<T, E = Never> {
    value: Arc<Mutex<T>>,
    broadcast: Broadcast<T, E>,
}

impl<T, E> Clone for CurrentValueSubject<T, E> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            broadcast: self.broadcast.clone(),
        }
    }
}

impl<T, E> CurrentValueSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub fn new(initial: T) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
            broadcast: Broadcast::new(),
        }
    }

    pub fn value(&self) -> T {
        self.value.lock().clone()
    }

    /// Store `value`, then deliver it to every live subscriber.
    pub fn send(&self, value: T) {
        if self.broadcast.is_completed() {
            return;
        }
        *self.value.lock() = value.clone();
        self.broadcast.send(value);
    }

    /// Store `value` without notifying anyone.
    pub fn set_value_silently(&self, value: T) {
        *self.value.lock() = value;
    }

    pub fn finish(&self) {
        self.broadcast.complete(Completion::Finished);
    }

    pub fn fail(&self, error: E) {
        self.broadcast.complete(Completion::Failure(error));
    }

    /// A view of this subject that skips the replay of the current value,
    /// so subscribers hear about changes only.
    pub fn changes(&self) -> Changes<T, E> {
        Changes {
            subject: self.clone(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.broadcast.subscriber_count()
    }

    pub fn is_completed(&self) -> bool {
        self.broadcast.is_completed()
    }

    /// True when both handles refer to the same subject.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl<T, E> Publisher for CurrentValueSubject<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    type Output = T;
    type Failure = E;

    fn subscribe(&self, sink: Sink<T, E>) -> Subscription {
        match self.broadcast.attach(sink) {
            Ok((subscription, sink)) => {
                sink.receive(self.value());
                subscription
            }
            Err(_) => Subscription::finished(),
        }
    }
}

impl<T: fmt::Debug, E> fmt::Debug for CurrentValueSubject<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrentValueSubject")
            .field("value", &*self.value.lock())
            .field("subscribers", &self.broadcast.inner.lock().entries.len())
            .finish()
    }
}

/// Change-only view of a [`CurrentValueSubject`].
pub struct Changes<T, E = Never> {
    subject: CurrentValueSubject<T, E>,
}

impl<T, E> Clone for Changes<T, E> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
        }
    }
}

impl<T, E> Publisher for Changes<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    type Output = T;
    type Failure = E;

    fn subscribe(&self, sink: Sink<T, E>) -> Subscription {
        match self.subject.broadcast.attach(sink) {
            Ok((subscription, _)) => subscription,
            Err(_) => Subscription::finished(),
        }
    }
}

/// Read-only view of a [`CurrentValueSubject`].
///
/// Observers get this instead of the subject itself: they can read and
/// subscribe, but only the owner can send or complete.
///
/// ```compile_fail
/// use mvikit::state::StateContainer;
///
/// let container = StateContainer::new(0);
/// container.state_publisher().send(1);
/// ```
///
/// ```compile_fail
/// use mvikit::state::StateContainer;
///
/// let container = StateContainer::new(0);
/// container.state_publisher().finish();
/// ```
pub struct StateStream<T, E = Never> {
    subject: CurrentValueSubject<T, E>,
}

impl<T, E> Clone for StateStream<T, E> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
        }
    }
}

impl<T, E> StateStream<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    pub(crate) fn new(subject: CurrentValueSubject<T, E>) -> Self {
        Self { subject }
    }

    pub fn value(&self) -> T {
        self.subject.value()
    }

    /// Subscribers of this view skip the replay of the current value.
    pub fn changes(&self) -> Changes<T, E> {
        self.subject.changes()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subject.subscriber_count()
    }

    /// True when both views read the same subject.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.subject.ptr_eq(&other.subject)
    }
}

impl<T, E> Publisher for StateStream<T, E>
where
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    type Output = T;
    type Failure = E;

    fn subscribe(&self, sink: Sink<T, E>) -> Subscription {
        self.subject.subscribe(sink)
    }
}

impl<T: fmt::Debug, E> fmt::Debug for StateStream<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateStream").field(&self.subject).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn recorder<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(T) + Send + Sync + 'static) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink_log = Arc::clone(&log);
        (log, move |value| sink_log.lock().push(value))
    }

    #[test]
    fn passthrough_delivers_only_later_values() {
        let subject: PassthroughSubject<i32> = PassthroughSubject::new();
        subject.send(1);
        let (log, sink) = recorder();
        let _subscription = subject.sink(sink);
        subject.send(2);
        subject.send(3);
        assert_eq!(*log.lock(), vec![2, 3]);
    }

    #[test]
    fn current_value_replays_on_subscribe() {
        let subject: CurrentValueSubject<i32> = CurrentValueSubject::new(7);
        let (log, sink) = recorder();
        let _subscription = subject.sink(sink);
        subject.send(8);
        assert_eq!(*log.lock(), vec![7, 8]);
        assert_eq!(subject.value(), 8);
    }

    #[test]
    fn changes_skip_the_replay() {
        let subject: CurrentValueSubject<i32> = CurrentValueSubject::new(7);
        let (log, sink) = recorder();
        let _subscription = subject.changes().sink(sink);
        subject.send(8);
        assert_eq!(*log.lock(), vec![8]);
    }

    #[test]
    fn dropping_the_handle_detaches() {
        let subject: PassthroughSubject<i32> = PassthroughSubject::new();
        let (log, sink) = recorder();
        let subscription = subject.sink(sink);
        assert_eq!(subject.subscriber_count(), 1);
        drop(subscription);
        assert_eq!(subject.subscriber_count(), 0);
        subject.send(1);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn completion_deactivates_and_ignores_later_sends() {
        let subject: PassthroughSubject<i32, String> = PassthroughSubject::new();
        let completions = Arc::new(Mutex::new(Vec::new()));
        let sink_completions = Arc::clone(&completions);
        let subscription = subject.subscribe(Sink::new(
            |_| {},
            move |completion| sink_completions.lock().push(completion),
        ));

        subject.fail("boom".to_string());
        subject.send(1);
        subject.finish();

        assert!(!subscription.is_active());
        assert_eq!(
            *completions.lock(),
            vec![Completion::Failure("boom".to_string())]
        );
    }

    #[test]
    fn subscribing_after_completion_gets_terminal_event() {
        let subject: PassthroughSubject<i32> = PassthroughSubject::new();
        subject.finish();
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);
        let subscription = subject.subscribe(Sink::new(
            |_| {},
            move |completion| {
                assert_eq!(completion, Completion::Finished);
                flag.store(true, Ordering::SeqCst);
            },
        ));
        assert!(finished.load(Ordering::SeqCst));
        assert!(!subscription.is_active());
    }

    #[test]
    fn completion_hook_runs_after_terminal_event_only() {
        let subject: PassthroughSubject<i32> = PassthroughSubject::new();
        let (log, sink) = recorder();
        let completed = subject.sink(sink);
        let hook_log = Arc::clone(&log);
        completed.on_completion(move || hook_log.lock().push(-1));

        let mut cancelled = subject.sink(|_| {});
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        cancelled.on_completion(move || flag.store(true, Ordering::SeqCst));
        cancelled.cancel();

        subject.send(1);
        subject.finish();
        assert_eq!(*log.lock(), vec![1, -1]);
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[test]
    fn state_stream_reads_and_replays() {
        let subject: CurrentValueSubject<i32> = CurrentValueSubject::new(1);
        let view = StateStream::new(subject.clone());
        let (log, sink) = recorder();
        let _subscription = view.sink(sink);
        subject.send(2);
        assert_eq!(view.value(), 2);
        assert_eq!(*log.lock(), vec![1, 2]);
        assert!(view.ptr_eq(&StateStream::new(subject)));
    }

    #[test]
    fn sink_may_cancel_a_later_sink_mid_delivery() {
        let subject: PassthroughSubject<i32> = PassthroughSubject::new();
        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let killer_victim = Arc::clone(&victim);
        let _killer = subject.sink(move |_| {
            if let Some(mut subscription) = killer_victim.lock().take() {
                subscription.cancel();
            }
        });
        let (log, sink) = recorder();
        *victim.lock() = Some(subject.sink(sink));

        subject.send(1);
        assert!(log.lock().is_empty());
    }
}
