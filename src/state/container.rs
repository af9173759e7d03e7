//! The state container every feature owns.

use std::borrow::Cow;
use std::sync::Arc;

use parking_lot::Mutex;

use super::observed::ObservedCell;
use crate::observer::Dispatch;
use crate::publisher::StateStream;

/// Opaque hint telling presentation code how to animate a change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition(Cow<'static, str>);

impl Transition {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// How an apply should be announced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOptions {
    /// When false the state changes but no notification is sent.
    pub notify: bool,
    /// Visible through [`StateContainer::current_transition`] while the
    /// notification is being delivered.
    pub transition: Option<Transition>,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            notify: true,
            transition: None,
        }
    }
}

impl ApplyOptions {
    /// Change state without telling subscribers.
    pub fn silent() -> Self {
        Self {
            notify: false,
            transition: None,
        }
    }

    pub fn with_transition(transition: Transition) -> Self {
        Self {
            notify: true,
            transition: Some(transition),
        }
    }
}

/// Holds one feature's current state and its change stream.
///
/// Every mutation is "compute the next value, store it, then notify". The
/// value is stored before subscribers run, and no lock is held while they
/// do, so a callback may read the state or apply again; nested applies are
/// delivered depth-first.
pub struct StateContainer<S> {
    cell: ObservedCell<S>,
    transition: Mutex<Option<Transition>>,
}

impl<S> StateContainer<S>
where
    S: Clone + Send + 'static,
{
    pub fn new(initial: S) -> Self {
        Self {
            cell: ObservedCell::new(initial),
            transition: Mutex::new(None),
        }
    }

    pub fn state(&self) -> S {
        self.cell.read()
    }

    /// The "state changed" stream. Requesting it the first time promotes the
    /// underlying cell; later calls view the same subject. The view is
    /// read-only: state only changes through the `apply_*` methods.
    pub fn state_publisher(&self) -> StateStream<S> {
        self.cell.stream()
    }

    /// Replace state with `map(current)`.
    pub fn apply_map(&self, map: impl FnOnce(S) -> S) {
        let next = map(self.state());
        self.commit(next, ApplyOptions::default());
    }

    /// Mutate a copy of the state in place, then store it.
    pub fn apply_update(&self, mutate: impl FnOnce(&mut S)) {
        self.apply_with(ApplyOptions::default(), mutate);
    }

    /// Replace state unconditionally.
    pub fn apply_make(&self, make: impl FnOnce() -> S) {
        self.commit(make(), ApplyOptions::default());
    }

    pub fn apply_with(&self, options: ApplyOptions, mutate: impl FnOnce(&mut S)) {
        let mut next = self.state();
        mutate(&mut next);
        self.commit(next, options);
    }

    /// Publish the current value again without changing it.
    pub fn renotify(&self) {
        self.commit(self.state(), ApplyOptions::default());
    }

    /// The transition of the notification currently being delivered, if any.
    pub fn current_transition(&self) -> Option<Transition> {
        self.transition.lock().clone()
    }

    fn commit(&self, next: S, options: ApplyOptions) {
        if !options.notify {
            self.cell.write_silently(next);
            return;
        }

        let Some(transition) = options.transition else {
            self.cell.write(next);
            return;
        };

        let previous = self.transition.lock().replace(transition);
        let _restore = scopeguard::guard(previous, |previous| {
            *self.transition.lock() = previous;
        });
        self.cell.write(next);
    }
}

impl<S: Clone + Send + Default + 'static> Default for StateContainer<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// A feature that owns a [`StateContainer`].
///
/// Implementors only point at their container; the read and apply surface
/// comes for free. Only the owning feature should call the `apply_*`
/// methods - others read and subscribe.
pub trait ReducibleState {
    type State: Clone + Send + 'static;

    fn container(&self) -> &StateContainer<Self::State>;

    fn state(&self) -> Self::State {
        self.container().state()
    }

    fn state_publisher(&self) -> StateStream<Self::State> {
        self.container().state_publisher()
    }

    fn apply_map(&self, map: impl FnOnce(Self::State) -> Self::State) {
        self.container().apply_map(map)
    }

    fn apply_update(&self, mutate: impl FnOnce(&mut Self::State)) {
        self.container().apply_update(mutate)
    }

    fn apply_make(&self, make: impl FnOnce() -> Self::State) {
        self.container().apply_make(make)
    }

    fn apply_with(&self, options: ApplyOptions, mutate: impl FnOnce(&mut Self::State)) {
        self.container().apply_with(options, mutate)
    }

    /// Entry point that re-publishes this feature's state, for forwarding a
    /// child's changes (see [`Observer::bind_child`](crate::observer::Observer::bind_child)).
    fn renotifications(self: &Arc<Self>) -> Dispatch<()>
    where
        Self: Sized + Send + Sync + 'static,
    {
        let weak = Arc::downgrade(self);
        Dispatch::new(move |()| {
            if let Some(this) = weak.upgrade() {
                this.container().renotify();
            }
        })
    }
}

impl<S> ReducibleState for StateContainer<S>
where
    S: Clone + Send + 'static,
{
    type State = S;

    fn container(&self) -> &StateContainer<S> {
        self
    }
}
