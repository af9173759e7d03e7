//! Model-View-Intent primitives for pure reducers.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: immutable representation of a feature ([`UiState`])
//! - **Intent**: user actions or system events ([`Intent`])
//! - **Reducer**: pure function from (state, intent) to the next state
//!   ([`ImmutableReducer`])
//!
//! [`ReducerStore`] plugs a pure reducer into the rest of the crate: it owns
//! a state container, accepts intents as actions and can be bound like any
//! other feature.

mod intent;
mod reducer;
mod state;
mod store;

pub use intent::Intent;
pub use reducer::ImmutableReducer;
pub use state::UiState;
pub use store::ReducerStore;
