//! Operation model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::atomic::{AtomicOp, ObjectOp};
use crate::document::Node;
use crate::path::Path;

/// What an operation does at its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    /// Insert a subtree so that it ends up at `path`.
    Insert,
    /// Remove the subtree at `path`.
    Delete,
    /// Change the node at `path` in place; the tree shape is untouched.
    Edit,
}

/// A single edit against a known document state.
///
/// Operations are plain values. Transforming one never touches the
/// original, so callers can keep it for history or undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(rename = "opType")]
    pub kind: OpKind,
    pub path: Path,
    #[serde(rename = "atomicOp", default)]
    pub atomic: AtomicOp,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("{kind:?} at {path:?} cannot carry a {payload}")]
    PayloadMismatch {
        kind: OpKind,
        path: Path,
        payload: &'static str,
    },
}

impl Operation {
    pub fn new(kind: OpKind, path: Path, atomic: AtomicOp) -> Self {
        Self { kind, path, atomic }
    }

    /// The canonical "apply nothing" value.
    pub fn noop() -> Self {
        Self {
            kind: OpKind::Edit,
            path: Vec::new(),
            atomic: AtomicOp::Noop,
        }
    }

    pub fn insert(path: Path, node: Node) -> Self {
        Self::new(
            OpKind::Insert,
            path,
            AtomicOp::Object(ObjectOp { payload: node }),
        )
    }

    pub fn delete(path: Path) -> Self {
        Self::new(OpKind::Delete, path, AtomicOp::Noop)
    }

    pub fn edit(path: Path, atomic: AtomicOp) -> Self {
        Self::new(OpKind::Edit, path, atomic)
    }

    /// An empty path addresses nothing, whatever the kind.
    pub fn is_noop(&self) -> bool {
        self.path.is_empty()
    }

    /// Checks that the payload fits the kind: inserts carry an object,
    /// deletes carry nothing, edits carry a leaf edit.
    pub fn validate(&self) -> Result<(), OperationError> {
        if self.is_noop() {
            return Ok(());
        }
        let fits = match self.kind {
            OpKind::Insert => matches!(self.atomic, AtomicOp::Object(_)),
            OpKind::Delete => matches!(self.atomic, AtomicOp::Noop),
            OpKind::Edit => matches!(
                self.atomic,
                AtomicOp::Integer(_) | AtomicOp::Boolean(_) | AtomicOp::Text(_) | AtomicOp::Noop
            ),
        };
        if fits {
            Ok(())
        } else {
            Err(OperationError::PayloadMismatch {
                kind: self.kind,
                path: self.path.clone(),
                payload: self.atomic.kind_name(),
            })
        }
    }
}

/// Replace an operation whose target has been consumed with the no-op.
pub fn normalise(op: Operation) -> Operation {
    if op.is_noop() {
        Operation::noop()
    } else {
        op
    }
}
