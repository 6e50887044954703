#![allow(dead_code)]

pub mod fixtures;

use tree_ot::{transform, ApplyError, Node, Operation};

/// Apply `a` then `b'`, and `b` then `a'`, to copies of `doc`.
pub fn apply_both_orders(
    doc: &Node,
    a: &Operation,
    b: &Operation,
) -> Result<(Node, Node), ApplyError> {
    let (a2, b2) = transform(a, b);

    let mut left = doc.clone();
    left.apply(a)?;
    left.apply(&b2)?;

    let mut right = doc.clone();
    right.apply(b)?;
    right.apply(&a2)?;

    Ok((left, right))
}

pub fn swap<T>((x, y): (T, T)) -> (T, T) {
    (y, x)
}
