//! Storage cell that becomes observable on demand.

use parking_lot::Mutex;

use crate::publisher::{CurrentValueSubject, StateStream};

enum Storage<V> {
    Bare(V),
    Promoted(CurrentValueSubject<V>),
}

/// Holds a value and turns it into a [`CurrentValueSubject`] the first time
/// someone asks for the stream. Callers only ever see a read-only
/// [`StateStream`]; writes go through the cell.
///
/// Until then writes are plain stores: nobody can be listening. After
/// promotion every write goes through the subject and reaches subscribers
/// before it returns. Promotion happens once and is never undone.
pub struct ObservedCell<V> {
    storage: Mutex<Storage<V>>,
}

impl<V> ObservedCell<V>
where
    V: Clone + Send + 'static,
{
    pub fn new(value: V) -> Self {
        Self {
            storage: Mutex::new(Storage::Bare(value)),
        }
    }

    pub fn read(&self) -> V {
        match &*self.storage.lock() {
            Storage::Bare(value) => value.clone(),
            Storage::Promoted(subject) => subject.value(),
        }
    }

    pub fn write(&self, value: V) {
        let subject = {
            let mut storage = self.storage.lock();
            match &mut *storage {
                Storage::Bare(current) => {
                    *current = value;
                    return;
                }
                Storage::Promoted(subject) => subject.clone(),
            }
        };
        subject.send(value);
    }

    /// Store without notifying, whatever the representation.
    pub fn write_silently(&self, value: V) {
        let mut storage = self.storage.lock();
        match &mut *storage {
            Storage::Bare(current) => *current = value,
            Storage::Promoted(subject) => subject.set_value_silently(value),
        }
    }

    /// The cell's stream, promoting it on first use. Every call returns the
    /// same subject.
    pub fn stream(&self) -> StateStream<V> {
        let mut storage = self.storage.lock();
        let seed = match &*storage {
            Storage::Promoted(subject) => return StateStream::new(subject.clone()),
            Storage::Bare(value) => value.clone(),
        };
        let subject = CurrentValueSubject::new(seed);
        *storage = Storage::Promoted(subject.clone());
        tracing::debug!(
            value_type = std::any::type_name::<V>(),
            "Observed cell promoted to stream"
        );
        StateStream::new(subject)
    }

    pub fn is_promoted(&self) -> bool {
        matches!(&*self.storage.lock(), Storage::Promoted(_))
    }
}
