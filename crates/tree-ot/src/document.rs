//! Reference document tree.
//!
//! A minimal tree that operations can be applied to. It exists so that the
//! convergence of [`crate::transform`] can be checked end to end; real
//! editors bring their own document model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::atomic::{AtomicOp, TextError};
use crate::operation::{OpKind, Operation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Node {
    Container(Vec<Node>),
    Text(String),
    Integer(i64),
    Boolean(bool),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("no node at {path:?}")]
    NotFound { path: Vec<usize> },
    #[error("node at {path:?} has no children")]
    NotAContainer { path: Vec<usize> },
    #[error("cannot insert at {index}: container at {path:?} holds {len}")]
    InsertOutOfRange {
        path: Vec<usize>,
        index: usize,
        len: usize,
    },
    #[error("{op} does not apply to the node at {path:?}")]
    PayloadMismatch { path: Vec<usize>, op: &'static str },
    #[error("integer overflow at {path:?}")]
    Overflow { path: Vec<usize> },
    #[error("text edit at {path:?}: {source}")]
    Text {
        path: Vec<usize>,
        #[source]
        source: TextError,
    },
}

impl Node {
    pub fn container(children: impl IntoIterator<Item = Node>) -> Self {
        Node::Container(children.into_iter().collect())
    }

    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Container(children) => Some(children),
            _ => None,
        }
    }

    pub fn get(&self, path: &[usize]) -> Option<&Node> {
        let mut cur = self;
        for &step in path {
            cur = cur.children()?.get(step)?;
        }
        Some(cur)
    }

    fn get_mut(&mut self, path: &[usize]) -> Result<&mut Node, ApplyError> {
        let mut cur = self;
        for (depth, &step) in path.iter().enumerate() {
            cur = match cur {
                Node::Container(children) => {
                    children.get_mut(step).ok_or_else(|| ApplyError::NotFound {
                        path: path[..=depth].to_vec(),
                    })?
                }
                _ => {
                    return Err(ApplyError::NotAContainer {
                        path: path[..depth].to_vec(),
                    })
                }
            };
        }
        Ok(cur)
    }

    fn children_mut(&mut self, path: &[usize]) -> Result<&mut Vec<Node>, ApplyError> {
        match self.get_mut(path)? {
            Node::Container(children) => Ok(children),
            _ => Err(ApplyError::NotAContainer {
                path: path.to_vec(),
            }),
        }
    }

    /// Apply `op` in place. The no-op leaves the tree untouched.
    pub fn apply(&mut self, op: &Operation) -> Result<(), ApplyError> {
        let Some((&index, parent)) = op.path.split_last() else {
            return Ok(());
        };

        match op.kind {
            OpKind::Insert => {
                let AtomicOp::Object(object) = &op.atomic else {
                    return Err(ApplyError::PayloadMismatch {
                        path: op.path.clone(),
                        op: op.atomic.kind_name(),
                    });
                };
                let children = self.children_mut(parent)?;
                if index > children.len() {
                    return Err(ApplyError::InsertOutOfRange {
                        path: parent.to_vec(),
                        index,
                        len: children.len(),
                    });
                }
                children.insert(index, object.payload.clone());
            }
            OpKind::Delete => {
                let children = self.children_mut(parent)?;
                if index >= children.len() {
                    return Err(ApplyError::NotFound {
                        path: op.path.clone(),
                    });
                }
                children.remove(index);
            }
            OpKind::Edit => {
                let target = self.get_mut(&op.path)?;
                edit_in_place(target, &op.atomic, &op.path)?;
            }
        }
        Ok(())
    }

    /// Apply every operation in order.
    pub fn apply_all<'a>(
        &mut self,
        ops: impl IntoIterator<Item = &'a Operation>,
    ) -> Result<(), ApplyError> {
        for op in ops {
            self.apply(op)?;
        }
        Ok(())
    }
}

fn edit_in_place(target: &mut Node, atomic: &AtomicOp, path: &[usize]) -> Result<(), ApplyError> {
    match (target, atomic) {
        (_, AtomicOp::Noop) => {}
        (Node::Integer(n), AtomicOp::Integer(op)) => {
            *n = n
                .checked_add(op.delta)
                .ok_or_else(|| ApplyError::Overflow { path: path.to_vec() })?;
        }
        (Node::Boolean(b), AtomicOp::Boolean(op)) => *b = op.value,
        (Node::Text(s), AtomicOp::Text(op)) => {
            *s = op.apply(s).map_err(|source| ApplyError::Text {
                path: path.to_vec(),
                source,
            })?;
        }
        (_, atomic) => {
            return Err(ApplyError::PayloadMismatch {
                path: path.to_vec(),
                op: atomic.kind_name(),
            })
        }
    }
    Ok(())
}
