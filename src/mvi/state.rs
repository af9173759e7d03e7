//! Marker trait for state driven by pure reducers.

/// State held by a [`ReducerStore`](super::ReducerStore).
///
/// `PartialEq` lets the store skip applying a result equal to the current
/// state, and `Default` backs `ReducerStore::default`.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
