mod common;

use common::fixtures::inc;
use common::swap;
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::select;
use tree_ot::atomic::{BooleanOp, TextOp};
use tree_ot::{normalise, transform, AtomicOp, Node, OpKind, Operation};

fn any_path() -> impl Strategy<Value = Vec<usize>> {
    vec(0usize..4, 0..4)
}

/// An in-place edit whose payload kind is fixed by the path, so two edits
/// of the same node always carry the same kind.
fn edit_at(path: Vec<usize>, delta: i64, pos: usize, text: &str) -> Operation {
    match path.iter().sum::<usize>() % 3 {
        0 => inc(path, delta),
        1 => Operation::edit(path, AtomicOp::Text(TextOp::splice(pos, 0, text))),
        _ => Operation::edit(path, AtomicOp::Boolean(BooleanOp { value: delta > 0 })),
    }
}

fn any_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        any_path().prop_map(|path| Operation::insert(path, Node::Integer(0))),
        any_path().prop_map(Operation::delete),
        (any_path(), -3i64..3, 0usize..3, select(vec!["a", "b", "ab"]))
            .prop_map(|(path, delta, pos, text)| edit_at(path, delta, pos, text)),
    ]
}

proptest! {
    #[test]
    fn transform_is_symmetric_under_swap(a in any_operation(), b in any_operation()) {
        prop_assert_eq!(transform(&a, &b), swap(transform(&b, &a)));
    }

    #[test]
    fn noop_is_absorbed(x in any_operation()) {
        let (noop, same) = transform(&Operation::noop(), &x);
        prop_assert_eq!(noop, Operation::noop());
        prop_assert_eq!(same, normalise(x));
    }

    #[test]
    fn normalise_is_idempotent(x in any_operation()) {
        let once = normalise(x.clone());
        prop_assert_eq!(normalise(once.clone()), once.clone());
        if x.path.is_empty() {
            prop_assert_eq!(once, Operation::noop());
        }
    }

    #[test]
    fn transform_leaves_inputs_alone(a in any_operation(), b in any_operation()) {
        let (a_before, b_before) = (a.clone(), b.clone());
        let _ = transform(&a, &b);
        prop_assert_eq!(a, a_before);
        prop_assert_eq!(b, b_before);
    }

    #[test]
    fn outputs_keep_their_kind_unless_consumed(a in any_operation(), b in any_operation()) {
        let (a2, b2) = transform(&a, &b);
        for (before, after) in [(&a, &a2), (&b, &b2)] {
            if after.is_noop() {
                prop_assert_eq!(after, &Operation::noop());
            } else {
                prop_assert_eq!(after.kind, before.kind);
                prop_assert_eq!(after.path.len(), before.path.len());
            }
        }
    }
}

#[test]
fn text_inserts_at_same_offset_are_symmetric() {
    let a = Operation::edit(vec![3], AtomicOp::Text(TextOp::splice(1, 0, "A")));
    let b = Operation::edit(vec![3], AtomicOp::Text(TextOp::splice(1, 0, "B")));
    assert_eq!(transform(&a, &b), swap(transform(&b, &a)));
}

#[test]
fn inserts_at_same_index_and_depth_are_stable() {
    let a = Operation::insert(vec![2], Node::Integer(1));
    let b = Operation::insert(vec![2], Node::Integer(2));
    assert_eq!(transform(&a, &b), (a.clone(), b.clone()));
}

#[test]
fn insert_at_five_moves_past_insert_at_two() {
    let a = Operation::insert(vec![2], Node::Integer(1));
    let b = Operation::insert(vec![5], Node::Integer(2));
    let (a2, b2) = transform(&a, &b);
    assert_eq!(a2, a);
    assert_eq!(b2.path, vec![6]);
}

#[test]
fn identical_deletes_both_vanish() {
    let d = Operation::delete(vec![3]);
    assert_eq!(transform(&d, &d), (Operation::noop(), Operation::noop()));
}

#[test]
fn delete_and_insert_at_same_index() {
    let (d, i) = transform(&Operation::delete(vec![1]), &Operation::insert(vec![1], Node::Integer(0)));
    assert_eq!((d.kind, d.path), (OpKind::Delete, vec![2]));
    assert_eq!((i.kind, i.path), (OpKind::Insert, vec![1]));
}

#[test]
fn insert_below_deleted_node_vanishes() {
    let (d, i) = transform(&Operation::delete(vec![2]), &Operation::insert(vec![2, 0], Node::Integer(0)));
    assert_eq!(d, Operation::delete(vec![2]));
    assert_eq!(i, Operation::noop());
}
