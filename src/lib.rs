//! Reactive state and dispatch core for feature-oriented applications.
//!
//! A feature owns a [`StateContainer`](state::StateContainer), accepts
//! messages through one or more reducer roles ([`reducers`]) and wires its
//! inputs to other features' outputs through an [`Observer`](observer::Observer).
//!
//! ```text
//! ┌────────────┐  intent / action / effect   ┌──────────────┐
//! │  binding   │ ──────────────────────────→ │   feature    │
//! └────────────┘                             │  reduce_*()  │
//!       ↑                                    └──────┬───────┘
//!       │        state changes / events             │ apply / publish
//!       └───────────────────────────────────────────┘
//! ```
//!
//! Delivery is synchronous: applying state stores the value and then runs
//! every subscriber before returning. Async reducer roles run on tokio.

pub mod config;
pub mod features;
pub mod logging;
pub mod mvi;
pub mod observer;
pub mod path;
pub mod property;
pub mod publisher;
pub mod reducers;
pub mod state;
pub mod task;

pub use observer::{bind, bind_feature, Dispatch, Observer, Pipeline, SubscriptionRegistry};
pub use path::Path;
pub use property::Property;
pub use publisher::{CurrentValueSubject, PassthroughSubject, Publisher, StateStream, Subscription};
pub use reducers::{
    ActionReducer, AsyncActionReducer, AsyncEffectReducer, AsyncIntentReducer, EffectReducer,
    EventReducer, IntentReducer, ReactionReducer,
};
pub use state::{ApplyOptions, ReducibleState, StateContainer, Transition};
pub use task::{DispatchError, TaskHandle};
