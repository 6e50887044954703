//! In-place edit payloads.
//!
//! A structural transform only moves paths around. When two operations end
//! up addressing the very same node, their payloads are reconciled through
//! [`AtomicTransform`]. The set of payload kinds is closed so that every
//! match over [`AtomicOp`] is checked for exhaustiveness.

pub mod text;

use serde::{Deserialize, Serialize};

use crate::document::Node;

pub use text::{TextComponent, TextError, TextOp};

/// Pairwise transform of two concurrent payloads at one node.
///
/// For `(a2, b2) = a.transform_against(&b)`, applying `a` then `b2` must
/// give the same node as applying `b` then `a2`.
pub trait AtomicTransform: Sized {
    fn transform_against(&self, other: &Self) -> (Self, Self);
}

/// Adds `delta` to an integer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerOp {
    pub delta: i64,
}

impl AtomicTransform for IntegerOp {
    fn transform_against(&self, other: &Self) -> (Self, Self) {
        (*self, *other)
    }
}

/// Sets a boolean node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanOp {
    pub value: bool,
}

impl AtomicTransform for BooleanOp {
    /// Disagreeing concurrent sets settle on `true`.
    fn transform_against(&self, other: &Self) -> (Self, Self) {
        if self.value == other.value {
            return (*self, *other);
        }
        let settled = BooleanOp { value: true };
        (settled, settled)
    }
}

/// The subtree an insert places into the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectOp {
    pub payload: Node,
}

impl AtomicTransform for ObjectOp {
    fn transform_against(&self, other: &Self) -> (Self, Self) {
        (self.clone(), other.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AtomicOp {
    #[default]
    #[serde(rename = "noOperation")]
    Noop,
    #[serde(rename = "integerOperation")]
    Integer(IntegerOp),
    #[serde(rename = "booleanOperation")]
    Boolean(BooleanOp),
    #[serde(rename = "stringOperation")]
    Text(TextOp),
    #[serde(rename = "objectOperation")]
    Object(ObjectOp),
}

impl AtomicOp {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AtomicOp::Noop => "noOperation",
            AtomicOp::Integer(_) => "integerOperation",
            AtomicOp::Boolean(_) => "booleanOperation",
            AtomicOp::Text(_) => "stringOperation",
            AtomicOp::Object(_) => "objectOperation",
        }
    }

    /// True when the two payloads can be transformed against each other.
    /// `Noop` pairs with anything.
    pub fn is_compatible(&self, other: &AtomicOp) -> bool {
        matches!(
            (self, other),
            (AtomicOp::Noop, _)
                | (_, AtomicOp::Noop)
                | (AtomicOp::Integer(_), AtomicOp::Integer(_))
                | (AtomicOp::Boolean(_), AtomicOp::Boolean(_))
                | (AtomicOp::Text(_), AtomicOp::Text(_))
                | (AtomicOp::Object(_), AtomicOp::Object(_))
        )
    }
}

impl AtomicTransform for AtomicOp {
    fn transform_against(&self, other: &Self) -> (Self, Self) {
        debug_assert!(
            self.is_compatible(other),
            "cannot transform {} against {}",
            self.kind_name(),
            other.kind_name()
        );
        match (self, other) {
            (AtomicOp::Integer(a), AtomicOp::Integer(b)) => {
                let (a, b) = a.transform_against(b);
                (AtomicOp::Integer(a), AtomicOp::Integer(b))
            }
            (AtomicOp::Boolean(a), AtomicOp::Boolean(b)) => {
                let (a, b) = a.transform_against(b);
                (AtomicOp::Boolean(a), AtomicOp::Boolean(b))
            }
            (AtomicOp::Text(a), AtomicOp::Text(b)) => {
                let (a, b) = a.transform_against(b);
                (AtomicOp::Text(a), AtomicOp::Text(b))
            }
            (AtomicOp::Object(a), AtomicOp::Object(b)) => {
                let (a, b) = a.transform_against(b);
                (AtomicOp::Object(a), AtomicOp::Object(b))
            }
            (AtomicOp::Noop, _) | (_, AtomicOp::Noop) => (self.clone(), other.clone()),
            _ => {
                tracing::warn!(
                    left = self.kind_name(),
                    right = other.kind_name(),
                    "payload kinds differ at one node; leaving both untouched"
                );
                (self.clone(), other.clone())
            }
        }
    }
}
