//! Get/set pairs that hide where a value lives.

use std::fmt;
use std::sync::Arc;

use crate::state::ReducibleState;

/// A readable, writable value whose storage is someone else's business.
///
/// Presentation code takes a `Property` to build an editable field without
/// knowing which feature backs it.
pub struct Property<V> {
    get: Arc<dyn Fn() -> V + Send + Sync>,
    set: Arc<dyn Fn(V) + Send + Sync>,
}

impl<V> Clone for Property<V> {
    fn clone(&self) -> Self {
        Self {
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
        }
    }
}

impl<V: 'static> Property<V> {
    pub fn new<G, S>(get: G, set: S) -> Self
    where
        G: Fn() -> V + Send + Sync + 'static,
        S: Fn(V) + Send + Sync + 'static,
    {
        Self {
            get: Arc::new(get),
            set: Arc::new(set),
        }
    }

    /// Read and replace a feature's whole state directly.
    pub fn from_state<F>(feature: &Arc<F>) -> Self
    where
        F: ReducibleState<State = V> + Send + Sync + 'static,
        V: Clone + Send,
    {
        let reader = Arc::clone(feature);
        let writer = Arc::clone(feature);
        Self::new(
            move || reader.state(),
            move |value| writer.apply_make(|| value),
        )
    }

    pub fn get(&self) -> V {
        (self.get)()
    }

    pub fn set(&self, value: V) {
        (self.set)(value)
    }

    /// Same setter, different getter.
    pub fn with_get<G>(self, get: G) -> Self
    where
        G: Fn() -> V + Send + Sync + 'static,
    {
        Self {
            get: Arc::new(get),
            set: self.set,
        }
    }

    /// Same getter, different setter.
    pub fn with_set<S>(self, set: S) -> Self
    where
        S: Fn(V) + Send + Sync + 'static,
    {
        Self {
            get: self.get,
            set: Arc::new(set),
        }
    }
}

impl<V: fmt::Debug + 'static> fmt::Debug for Property<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateContainer;
    use parking_lot::Mutex;

    #[test]
    fn closures_back_get_and_set() {
        let slot = Arc::new(Mutex::new(1));
        let (read, write) = (Arc::clone(&slot), Arc::clone(&slot));
        let property = Property::new(move || *read.lock(), move |value| *write.lock() = value);
        property.set(9);
        assert_eq!(property.get(), 9);
        assert_eq!(*slot.lock(), 9);
    }

    #[test]
    fn from_state_writes_through_the_container() {
        let container = Arc::new(StateContainer::new("a".to_string()));
        let property = Property::from_state(&container);
        property.set("b".to_string());
        assert_eq!(container.state(), "b");
        assert_eq!(property.get(), "b");
    }

    #[test]
    fn overrides_keep_the_other_half() {
        let container = Arc::new(StateContainer::new(10));
        let clamped = Property::from_state(&container).with_get({
            let container = Arc::clone(&container);
            move || container.state().min(5)
        });
        assert_eq!(clamped.get(), 5);
        clamped.set(3);
        assert_eq!(container.state(), 3);

        let rejected = Property::from_state(&container).with_set(|_| {});
        rejected.set(100);
        assert_eq!(rejected.get(), 3);
    }
}
