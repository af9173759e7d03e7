//! Feature state: the lazily observable cell and the container built on it.

mod container;
mod observed;

pub use container::{ApplyOptions, ReducibleState, StateContainer, Transition};
pub use observed::ObservedCell;
