//! Pairwise transform of concurrent tree operations.
//!
//! `transform(a, b)` takes two operations issued against the same document
//! state and returns `(a2, b2)` such that applying `a` then `b2` gives the
//! same document as applying `b` then `a2`.
//!
//! Only the index where the two paths contend is ever rewritten. The tie
//! rules at equal indices decide which client's structure ends up first and
//! their branch order must not change.

use thiserror::Error;
use tracing::{debug, trace};

use crate::atomic::AtomicTransform;
use crate::operation::{normalise, OpKind, Operation, OperationError};
use crate::path::{effect_independent, transformation_point, update, Path};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("invalid operation: {0}")]
    Invalid(#[from] OperationError),
    #[error("{left} and {right} edit the same node at {path:?}")]
    IncompatiblePayloads {
        path: Path,
        left: &'static str,
        right: &'static str,
    },
}

/// Transform two concurrent operations against each other.
///
/// Never fails: an operation whose target the other one destroyed comes back
/// as [`Operation::noop`].
pub fn transform(a: &Operation, b: &Operation) -> (Operation, Operation) {
    let mut next_a = a.clone();
    let mut next_b = b.clone();
    if a.is_noop() || b.is_noop() {
        return (normalise(next_a), normalise(next_b));
    }

    let (path_a, path_b) = transform_paths(a, b);
    if path_a == a.path && path_b == b.path {
        // Same node and nothing moved: reconcile the payloads.
        if a.path == b.path {
            let (atomic_a, atomic_b) = a.atomic.transform_against(&b.atomic);
            next_a.atomic = atomic_a;
            next_b.atomic = atomic_b;
        }
    } else {
        if path_a.is_empty() {
            debug!(path = ?a.path, kind = ?a.kind, "left operation consumed");
        }
        if path_b.is_empty() {
            debug!(path = ?b.path, kind = ?b.kind, "right operation consumed");
        }
        next_a.path = path_a;
        next_b.path = path_b;
    }
    (normalise(next_a), normalise(next_b))
}

/// Like [`transform`], but rejects malformed input instead of transforming
/// it silently.
pub fn try_transform(
    a: &Operation,
    b: &Operation,
) -> Result<(Operation, Operation), TransformError> {
    a.validate()?;
    b.validate()?;
    if a.kind == b.kind && a.path == b.path && !a.atomic.is_compatible(&b.atomic) {
        return Err(TransformError::IncompatiblePayloads {
            path: a.path.clone(),
            left: a.atomic.kind_name(),
            right: b.atomic.kind_name(),
        });
    }
    Ok(transform(a, b))
}

/// Rewrite both paths. Returns them unchanged when the operations do not
/// interact.
fn transform_paths(a: &Operation, b: &Operation) -> (Path, Path) {
    let tp = transformation_point(&a.path, &b.path);
    if effect_independent(&a.path, &b.path, tp) {
        trace!(tp, "independent effects");
        return (a.path.clone(), b.path.clone());
    }
    trace!(tp, left = ?a.kind, right = ?b.kind, "rewriting paths");

    match (a.kind, b.kind) {
        (OpKind::Insert, OpKind::Insert) => transform_inserts(&a.path, &b.path, tp),
        (OpKind::Delete, OpKind::Delete) => transform_deletes(&a.path, &b.path, tp),
        (OpKind::Insert, OpKind::Delete) => transform_insert_delete(&a.path, &b.path, tp),
        (OpKind::Delete, OpKind::Insert) => {
            let (insert, delete) = transform_insert_delete(&b.path, &a.path, tp);
            (delete, insert)
        }
        (OpKind::Insert | OpKind::Delete, OpKind::Edit) => {
            transform_structural_edit(a.kind, &a.path, &b.path, tp)
        }
        (OpKind::Edit, OpKind::Insert | OpKind::Delete) => {
            let (structural, edit) = transform_structural_edit(b.kind, &b.path, &a.path, tp);
            (edit, structural)
        }
        (OpKind::Edit, OpKind::Edit) => (a.path.clone(), b.path.clone()),
    }
}

/// Two inserts. The later slot moves up; at the same slot the deeper insert
/// moves, and equal depths stay put.
fn transform_inserts(a: &[usize], b: &[usize], tp: usize) -> (Path, Path) {
    if a[tp] > b[tp] {
        (update(a, tp, 1), b.to_vec())
    } else if a[tp] < b[tp] {
        (a.to_vec(), update(b, tp, 1))
    } else if a.len() > b.len() {
        (update(a, tp, 1), b.to_vec())
    } else if a.len() < b.len() {
        (a.to_vec(), update(b, tp, 1))
    } else {
        (a.to_vec(), b.to_vec())
    }
}

/// Two deletes. The later slot moves down; at the same slot the deeper
/// delete lost its subtree, and equal depths deleted the same node.
fn transform_deletes(a: &[usize], b: &[usize], tp: usize) -> (Path, Path) {
    if a[tp] > b[tp] {
        (update(a, tp, -1), b.to_vec())
    } else if a[tp] < b[tp] {
        (a.to_vec(), update(b, tp, -1))
    } else if a.len() > b.len() {
        (Vec::new(), b.to_vec())
    } else if a.len() < b.len() {
        (a.to_vec(), Vec::new())
    } else {
        (Vec::new(), Vec::new())
    }
}

/// An insert against a delete, returned in `(insert, delete)` order.
fn transform_insert_delete(insert: &[usize], delete: &[usize], tp: usize) -> (Path, Path) {
    if insert[tp] > delete[tp] {
        (update(insert, tp, -1), delete.to_vec())
    } else if insert[tp] < delete[tp] {
        (insert.to_vec(), update(delete, tp, 1))
    } else if insert.len() > delete.len() {
        // Inserting into the subtree being deleted.
        (Vec::new(), delete.to_vec())
    } else {
        (insert.to_vec(), update(delete, tp, 1))
    }
}

/// A structural operation against an in-place edit, returned in
/// `(structural, edit)` order. The structural path never moves.
fn transform_structural_edit(
    kind: OpKind,
    structural: &[usize],
    edit: &[usize],
    tp: usize,
) -> (Path, Path) {
    let at_or_before = structural[tp] < edit[tp]
        || (structural[tp] == edit[tp] && structural.len() <= edit.len());
    let edit = match kind {
        OpKind::Insert if at_or_before => update(edit, tp, 1),
        OpKind::Delete if structural[tp] < edit[tp] => update(edit, tp, -1),
        // The edited node sits inside the deleted subtree.
        OpKind::Delete if at_or_before => Vec::new(),
        _ => edit.to_vec(),
    };
    (structural.to_vec(), edit)
}
