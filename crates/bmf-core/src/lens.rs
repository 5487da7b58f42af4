//! Null-safe views over an untyped YAML tree.
//!
//! Four handle types share the [`Navigable`] read surface:
//!
//! - [`Detached`] owns a literal node (a filter value, a freshly built
//!   sequence). It has no write-back at all, so it cannot be mistaken for a
//!   document slot.
//! - [`Bound`] borrows one live slot of a document mutably. Writing through
//!   it changes the document the slot came from.
//! - [`Lens`] is what navigation returns: either a [`Bound`] slot or
//!   `Absent` when a key is missing or the parent has the wrong shape.
//!   Absence propagates through further navigation. Writing requires
//!   [`Lens::bound`], so an absent value can never be written.
//! - [`Peek`] is a `Copy` read-only view with the same null-safe navigation.
//!
//! Navigation never creates keys.
use serde_yaml::Value;

use crate::document::{NodeKind, kind_of};

static ABSENT: Value = Value::Null;

/// Read access shared by every handle type.
pub trait Navigable {
    /// The wrapped node, `None` when navigation found nothing.
    fn node(&self) -> Option<&Value>;

    fn peek(&self) -> Peek<'_> {
        Peek(self.node())
    }

    /// Raw node for serialization or comparison; absence reads as null.
    fn underlying(&self) -> &Value {
        self.node().unwrap_or(&ABSENT)
    }

    fn kind(&self) -> NodeKind {
        kind_of(self.underlying())
    }

    fn is_absent(&self) -> bool {
        self.kind() == NodeKind::Absent
    }

    /// True iff this wraps a sequence with a string element equal to `s`.
    fn contains_string(&self, s: &str) -> bool {
        match self.node() {
            Some(Value::Sequence(items)) => items.iter().any(|e| e.as_str() == Some(s)),
            _ => false,
        }
    }
}

// -------- read-only view --------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peek<'a>(Option<&'a Value>);

impl<'a> Peek<'a> {
    pub fn of(value: &'a Value) -> Self {
        Peek(Some(value))
    }

    pub fn absent() -> Self {
        Peek(None)
    }

    pub fn field(self, key: &str) -> Peek<'a> {
        Peek(self.0.and_then(Value::as_mapping).and_then(|m| m.get(key)))
    }

    pub fn elements(self) -> Vec<Peek<'a>> {
        match self.0 {
            Some(Value::Sequence(items)) => items.iter().map(Peek::of).collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_str(self) -> Option<&'a str> {
        self.0.and_then(Value::as_str)
    }
}

impl Navigable for Peek<'_> {
    fn node(&self) -> Option<&Value> {
        self.0
    }
}

// -------- owned literal --------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detached {
    node: Value,
}

impl Detached {
    pub fn wrap(value: impl Into<Value>) -> Self {
        Detached { node: value.into() }
    }

    pub fn absent() -> Self {
        Detached { node: Value::Null }
    }

    /// Fresh sequence holding each item's underlying node, in order.
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Detached>,
    {
        Detached {
            node: Value::Sequence(items.into_iter().map(Detached::into_value).collect()),
        }
    }

    pub fn into_value(self) -> Value {
        self.node
    }
}

impl From<Value> for Detached {
    fn from(node: Value) -> Self {
        Detached { node }
    }
}

impl Navigable for Detached {
    fn node(&self) -> Option<&Value> {
        Some(&self.node)
    }
}

// -------- live slot --------

/// A writable slot inside a document: a map entry, a sequence element, or
/// the root itself.
#[derive(Debug)]
pub struct Bound<'a> {
    slot: &'a mut Value,
}

impl<'a> Bound<'a> {
    pub fn new(slot: &'a mut Value) -> Self {
        Bound { slot }
    }

    pub fn reborrow(&mut self) -> Bound<'_> {
        Bound { slot: &mut *self.slot }
    }

    pub fn field(self, key: &str) -> Lens<'a> {
        let Bound { slot } = self;
        match slot {
            Value::Mapping(map) => match map.get_mut(key) {
                Some(slot) => Lens::Bound(Bound { slot }),
                None => Lens::Absent,
            },
            _ => Lens::Absent,
        }
    }

    /// One slot per element; each writes to its own index.
    pub fn elements(self) -> Vec<Bound<'a>> {
        let Bound { slot } = self;
        match slot {
            Value::Sequence(items) => items.iter_mut().map(|slot| Bound { slot }).collect(),
            _ => Vec::new(),
        }
    }

    /// Overwrite the slot with `value`'s node.
    pub fn set(&mut self, value: Detached) {
        *self.slot = value.node;
    }

    /// Move the node out, leaving null behind.
    pub fn detach(self) -> Detached {
        Detached { node: std::mem::take(self.slot) }
    }
}

impl Navigable for Bound<'_> {
    fn node(&self) -> Option<&Value> {
        Some(&*self.slot)
    }
}

// -------- navigation result --------

#[derive(Debug)]
pub enum Lens<'a> {
    Bound(Bound<'a>),
    Absent,
}

impl<'a> Lens<'a> {
    pub fn root(doc: &'a mut Value) -> Self {
        Lens::Bound(Bound::new(doc))
    }

    pub fn field(self, key: &str) -> Lens<'a> {
        match self {
            Lens::Bound(b) => b.field(key),
            Lens::Absent => Lens::Absent,
        }
    }

    pub fn elements(self) -> Vec<Bound<'a>> {
        match self {
            Lens::Bound(b) => b.elements(),
            Lens::Absent => Vec::new(),
        }
    }

    /// The writable slot, if navigation reached one.
    pub fn bound(self) -> Option<Bound<'a>> {
        match self {
            Lens::Bound(b) => Some(b),
            Lens::Absent => None,
        }
    }
}

impl Navigable for Lens<'_> {
    fn node(&self) -> Option<&Value> {
        match self {
            Lens::Bound(b) => b.node(),
            Lens::Absent => None,
        }
    }
}
