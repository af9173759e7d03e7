//! Ready-made features.
//!
//! Small, reusable building blocks written against the same traits as any
//! application feature: each owns a [`StateContainer`](crate::state::StateContainer)
//! and accepts intents.
//!
//! - `value.rs` - one value, every update announced
//! - `optional_value.rs` - an optional value, only real changes announced
//! - `pager.rs` - page counter driven by scroll offsets
//! - `list.rs` - items plus selection, composed from the two above

mod list;
mod optional_value;
mod pager;
mod value;

use std::sync::Arc;

use crate::property::Property;

pub use list::{ListFeature, ListIntent, ListState};
pub use optional_value::{OptionalValueFeature, OptionalValueIntent};
pub use pager::{PagerFeature, PagerIntent, PagerState};
pub use value::{ValueFeature, ValueIntent};

/// A feature that can hand out its main value as a [`Property`].
pub trait Modulable {
    type Value;

    fn value(self: &Arc<Self>) -> Property<Self::Value>;
}
