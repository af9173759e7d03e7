//! The reducer family.
//!
//! Each trait is one role a feature can play. Roles combine freely on one
//! type; a feature implements exactly the set it supports.
//!
//! | role            | sync                | async                |
//! |-----------------|---------------------|----------------------|
//! | intent          | [`IntentReducer`]   | [`AsyncIntentReducer`] |
//! | action          | [`ActionReducer`]   | [`AsyncActionReducer`] |
//! | action+reaction | [`ReactionReducer`] | [`AsyncActionReducer`] |
//! | effect          | [`EffectReducer`]   | [`AsyncEffectReducer`] |
//! | event           | [`EventReducer`]    |                      |
//!
//! Every role has a plain invoke method (`intent`, `action`, `react`,
//! `effect`, `publish`) and a `Dispatch` constructor for bindings. Async
//! roles add a detached `dispatch_*` that returns immediately and drops the
//! outcome.

mod action;
mod effect;
mod event;
mod intent;

pub use action::{ActionReducer, AsyncActionReducer, ReactionReducer};
pub use effect::{AsyncEffectReducer, EffectReducer};
pub use event::EventReducer;
pub use intent::{AsyncIntentReducer, IntentReducer};
