//! Character-level text edits inside a single text node.
//!
//! # Operation format
//!
//! A `TextOp` is a sequence of components walked left to right over the
//! source string:
//! - `Retain(n)` — keep `n` characters
//! - `Insert(s)` — insert `s`
//! - `Delete(n)` — drop `n` characters
//!
//! Anything past the last component is retained implicitly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::AtomicTransform;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextComponent {
    Retain(usize),
    Insert(String),
    Delete(usize),
}

impl TextComponent {
    /// Length of this component (in chars) on the *source* string.
    pub fn src_len(&self) -> usize {
        match self {
            TextComponent::Retain(n) => *n,
            TextComponent::Insert(_) => 0,
            TextComponent::Delete(n) => *n,
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            TextComponent::Retain(n) | TextComponent::Delete(n) => *n == 0,
            TextComponent::Insert(s) => s.is_empty(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("text op spans {needed} chars but the node holds {len}")]
    OutOfBounds { needed: usize, len: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextOp {
    pub components: Vec<TextComponent>,
}

impl TextOp {
    pub fn new(components: Vec<TextComponent>) -> Self {
        Self {
            components: normalize(components),
        }
    }

    /// Delete `delete` chars at `pos`, then insert `insert` there.
    pub fn splice(pos: usize, delete: usize, insert: impl Into<String>) -> Self {
        Self::new(vec![
            TextComponent::Retain(pos),
            TextComponent::Delete(delete),
            TextComponent::Insert(insert.into()),
        ])
    }

    /// Number of source chars this op walks over.
    pub fn src_len(&self) -> usize {
        self.components.iter().map(TextComponent::src_len).sum()
    }

    /// Apply this op to `s`, returning the edited string.
    pub fn apply(&self, s: &str) -> Result<String, TextError> {
        let chars: Vec<char> = s.chars().collect();
        let needed = self.src_len();
        if needed > chars.len() {
            return Err(TextError::OutOfBounds {
                needed,
                len: chars.len(),
            });
        }

        let mut result = String::with_capacity(s.len());
        let mut idx = 0usize;
        for comp in &self.components {
            match comp {
                TextComponent::Retain(n) => {
                    result.extend(&chars[idx..idx + n]);
                    idx += n;
                }
                TextComponent::Insert(ins) => result.push_str(ins),
                TextComponent::Delete(n) => idx += n,
            }
        }
        result.extend(&chars[idx..]);
        Ok(result)
    }
}

impl AtomicTransform for TextOp {
    fn transform_against(&self, other: &Self) -> (Self, Self) {
        (transform(self, other), transform(other, self))
    }
}

/// Append a component, merging with the last component if same type.
fn append(op: &mut Vec<TextComponent>, comp: TextComponent) {
    if comp.is_empty() {
        return;
    }
    match (op.last_mut(), &comp) {
        (Some(TextComponent::Retain(n)), TextComponent::Retain(m)) => {
            *n += m;
            return;
        }
        (Some(TextComponent::Delete(n)), TextComponent::Delete(m)) => {
            *n += m;
            return;
        }
        (Some(TextComponent::Insert(s)), TextComponent::Insert(t)) => {
            s.push_str(t);
            return;
        }
        _ => {}
    }
    op.push(comp);
}

/// Coalesce adjacent same-type components, drop empty ones and strip the
/// trailing retain.
pub fn normalize(components: Vec<TextComponent>) -> Vec<TextComponent> {
    let mut result = Vec::with_capacity(components.len());
    for comp in components {
        append(&mut result, comp);
    }
    while matches!(result.last(), Some(TextComponent::Retain(_))) {
        result.pop();
    }
    result
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Transform `op` so it applies after `against`.
///
/// Concurrent inserts at the same offset are ordered by their text, smaller
/// first, so the outcome does not depend on which side is `op`. Equal texts
/// produce the same string in either order.
pub fn transform(op: &TextOp, against: &TextOp) -> TextOp {
    use TextComponent::{Delete, Insert, Retain};

    let mut result = Vec::new();
    let mut op_iter = op.components.iter().cloned();
    let mut ag_iter = against.components.iter().cloned();
    let mut rem_op: Option<TextComponent> = None;
    let mut rem_ag: Option<TextComponent> = None;

    loop {
        let o = rem_op.take().or_else(|| op_iter.next());
        let a = rem_ag.take().or_else(|| ag_iter.next());

        match (o, a) {
            (None, _) => break,
            (Some(o), None) => append(&mut result, o),
            (Some(Insert(s)), Some(Insert(t))) => {
                if s <= t {
                    append(&mut result, Insert(s));
                    rem_ag = Some(Insert(t));
                } else {
                    append(&mut result, Retain(char_len(&t)));
                    rem_op = Some(Insert(s));
                }
            }
            // Skip over text the other side inserted.
            (Some(o), Some(Insert(t))) => {
                append(&mut result, Retain(char_len(&t)));
                rem_op = Some(o);
            }
            (Some(Insert(s)), Some(a)) => {
                append(&mut result, Insert(s));
                rem_ag = Some(a);
            }
            (Some(Retain(n)), Some(Retain(m))) => {
                append(&mut result, Retain(n.min(m)));
                if n > m {
                    rem_op = Some(Retain(n - m));
                } else if m > n {
                    rem_ag = Some(Retain(m - n));
                }
            }
            // Retained chars are gone; nothing to emit.
            (Some(Retain(n)), Some(Delete(m))) => {
                if n > m {
                    rem_op = Some(Retain(n - m));
                } else if m > n {
                    rem_ag = Some(Delete(m - n));
                }
            }
            (Some(Delete(n)), Some(Retain(m))) => {
                append(&mut result, Delete(n.min(m)));
                if n > m {
                    rem_op = Some(Delete(n - m));
                } else if m > n {
                    rem_ag = Some(Retain(m - n));
                }
            }
            // Both deleted the same chars; only the excess survives.
            (Some(Delete(n)), Some(Delete(m))) => {
                if n > m {
                    rem_op = Some(Delete(n - m));
                } else if m > n {
                    rem_ag = Some(Delete(m - n));
                }
            }
        }
    }
    TextOp {
        components: normalize(result),
    }
}
