use tree_ot::atomic::{IntegerOp, TextOp};
use tree_ot::{AtomicOp, Node, Operation, Path};

/// A small document with nesting on both sides of a leaf.
pub fn sample_document() -> Node {
    Node::container([
        Node::container([Node::Integer(1), Node::Integer(2), Node::text("ab")]),
        Node::Integer(3),
        Node::container([Node::container([Node::Integer(4)]), Node::Boolean(false)]),
        Node::text("xyz"),
    ])
}

fn walk(node: &Node, path: &mut Path, visit: &mut impl FnMut(&Path, &Node)) {
    visit(path, node);
    if let Some(children) = node.children() {
        for (i, child) in children.iter().enumerate() {
            path.push(i);
            walk(child, path, visit);
            path.pop();
        }
    }
}

/// Every non-root node path.
pub fn node_paths(doc: &Node) -> Vec<Path> {
    let mut out = Vec::new();
    walk(doc, &mut Vec::new(), &mut |path, _| {
        if !path.is_empty() {
            out.push(path.clone());
        }
    });
    out
}

/// Every position an insert could target, including appends.
pub fn insert_slots(doc: &Node) -> Vec<Path> {
    let mut out = Vec::new();
    walk(doc, &mut Vec::new(), &mut |path, node| {
        if let Some(children) = node.children() {
            for i in 0..=children.len() {
                let mut slot = path.clone();
                slot.push(i);
                out.push(slot);
            }
        }
    });
    out
}

pub fn integer_leaves(doc: &Node) -> Vec<Path> {
    let mut out = Vec::new();
    walk(doc, &mut Vec::new(), &mut |path, node| {
        if matches!(node, Node::Integer(_)) {
            out.push(path.clone());
        }
    });
    out
}

pub fn inc(path: Path, delta: i64) -> Operation {
    Operation::edit(path, AtomicOp::Integer(IntegerOp { delta }))
}

/// Text leaves with their length in chars.
pub fn text_leaves(doc: &Node) -> Vec<(Path, usize)> {
    let mut out = Vec::new();
    walk(doc, &mut Vec::new(), &mut |path, node| {
        if let Node::Text(s) = node {
            out.push((path.clone(), s.chars().count()));
        }
    });
    out
}

/// Replace up to `delete` chars at `pos` of a text leaf, clamped to `len`.
pub fn splice(path: Path, len: usize, pos: usize, delete: usize, insert: &str) -> Operation {
    let pos = pos.min(len);
    let delete = delete.min(len - pos);
    Operation::edit(path, AtomicOp::Text(TextOp::splice(pos, delete, insert)))
}
