//! Marker trait for messages fed to pure reducers.

/// Message consumed by an [`ImmutableReducer`](super::ImmutableReducer).
///
/// A [`ReducerStore`](super::ReducerStore) takes intents as its actions, so
/// they arrive through `action()` or any binding aimed at `actions()`.
pub trait Intent: Send + 'static {}
