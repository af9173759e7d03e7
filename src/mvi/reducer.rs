//! Pure reducer contract.

use super::intent::Intent;
use super::state::UiState;

/// Reducer that derives the next state from the previous one.
///
/// It must be a pure function: (State, Intent) -> State. Rejecting an
/// intent returns an error and leaves the decision about the old state to
/// the caller.
pub trait ImmutableReducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Why an intent was rejected.
    type Error: Send + 'static;

    /// Process an intent and return the new state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Result<Self::State, Self::Error>;

    /// Same as [`reduce`](Self::reduce); reads better at call sites.
    fn call(state: Self::State, intent: Self::Intent) -> Result<Self::State, Self::Error> {
        Self::reduce(state, intent)
    }
}
