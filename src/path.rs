//! Read-only accessors into a value.
//!
//! A [`Path`] pulls a sub-value out of a root either by projecting a field,
//! which always succeeds, or by matching one alternative of an enum, which
//! succeeds only while the root holds that alternative.
//!
//! ```
//! use mvikit::path::Path;
//!
//! #[derive(Clone)]
//! enum Load {
//!     Idle,
//!     Done(Vec<u32>),
//! }
//!
//! let done = Path::case(|load: &Load| match load {
//!     Load::Done(items) => Some(items.clone()),
//!     _ => None,
//! });
//! assert_eq!(done.extract(&Load::Done(vec![1])), Some(vec![1]));
//! assert_eq!(done.extract(&Load::Idle), None);
//! ```

use std::fmt;
use std::sync::Arc;

type FieldFn<Root, Value> = Arc<dyn Fn(&Root) -> Value + Send + Sync>;
type CaseFn<Root, Value> = Arc<dyn Fn(&Root) -> Option<Value> + Send + Sync>;

enum Kind<Root, Value> {
    Field(FieldFn<Root, Value>),
    Case(CaseFn<Root, Value>),
}

/// Projection from `Root` to an optional `Value`.
///
/// There is no setter: writing back into a specific enum alternative is
/// up to the feature that owns the root.
pub struct Path<Root, Value> {
    kind: Kind<Root, Value>,
}

impl<Root, Value> Clone for Path<Root, Value> {
    fn clone(&self) -> Self {
        let kind = match &self.kind {
            Kind::Field(get) => Kind::Field(Arc::clone(get)),
            Kind::Case(extract) => Kind::Case(Arc::clone(extract)),
        };
        Self { kind }
    }
}

impl<Root: 'static, Value: 'static> Path<Root, Value> {
    /// A structural field. Extraction never fails.
    pub fn field<F>(get: F) -> Self
    where
        F: Fn(&Root) -> Value + Send + Sync + 'static,
    {
        Self {
            kind: Kind::Field(Arc::new(get)),
        }
    }

    /// One alternative of a tagged union. `extract` returns its payload only
    /// when the root currently holds it.
    pub fn case<F>(extract: F) -> Self
    where
        F: Fn(&Root) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            kind: Kind::Case(Arc::new(extract)),
        }
    }

    pub fn extract(&self, root: &Root) -> Option<Value> {
        match &self.kind {
            Kind::Field(get) => Some(get(root)),
            Kind::Case(extract) => extract(root),
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, Kind::Field(_))
    }

    /// Continue into `next`. Two field paths compose into a field path;
    /// anything involving a case path may miss.
    pub fn appending<Sub: 'static>(&self, next: &Path<Value, Sub>) -> Path<Root, Sub> {
        match (&self.kind, &next.kind) {
            (Kind::Field(outer), Kind::Field(inner)) => {
                let (outer, inner) = (Arc::clone(outer), Arc::clone(inner));
                Path::field(move |root| inner(&outer(root)))
            }
            _ => {
                let (outer, inner) = (self.clone(), next.clone());
                Path::case(move |root| outer.extract(root).and_then(|value| inner.extract(&value)))
            }
        }
    }
}

impl<Root, Value> fmt::Debug for Path<Root, Value> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            Kind::Field(_) => "field",
            Kind::Case(_) => "case",
        };
        write!(
            f,
            "Path<{}, {}>({})",
            std::any::type_name::<Root>(),
            std::any::type_name::<Value>(),
            kind
        )
    }
}
