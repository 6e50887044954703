//! tree-ot — operational transformation for tree-structured documents.
//!
//! Two clients edit the same document snapshot concurrently. Each edit is an
//! [`Operation`]: an insert, a delete, or an in-place edit addressed by a
//! [`Path`] of child indices. [`transform`] rewrites the pair so that either
//! application order converges on the same document.
//!
//! ```
//! use tree_ot::{transform, Operation, Node};
//!
//! let a = Operation::insert(vec![2], Node::Integer(1));
//! let b = Operation::insert(vec![5], Node::Integer(2));
//! let (a2, b2) = transform(&a, &b);
//! assert_eq!(a2.path, vec![2]);
//! assert_eq!(b2.path, vec![6]);
//! ```

pub mod atomic;
pub mod cli;
pub mod document;
pub mod history;
pub mod operation;
pub mod path;
pub mod transform;
pub mod wire;

pub use atomic::{AtomicOp, AtomicTransform};
pub use document::{ApplyError, Node};
pub use history::{rebase_pending, History, HistoryError};
pub use operation::{normalise, OpKind, Operation, OperationError};
pub use path::Path;
pub use transform::{transform, try_transform, TransformError};
