//! Rebasing operations against a sequence of accepted operations.
//!
//! A server keeps the operations it accepted in order. A client tags each
//! operation with how many of them it had seen; everything after that mark
//! is concurrent and the incoming operation is transformed past it before
//! being accepted. Clients do the mirror image with their pending queue.

use thiserror::Error;
use tracing::debug;

use crate::operation::Operation;
use crate::transform::transform;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("client acknowledged {acknowledged} operations but only {len} exist")]
    AheadOfHistory { acknowledged: usize, len: usize },
}

/// Accepted operations, in the order they were applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    applied: Vec<Operation>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.applied
    }

    /// Transform `op` past every accepted operation after `acknowledged`.
    pub fn rebase(&self, op: &Operation, acknowledged: usize) -> Result<Operation, HistoryError> {
        let concurrent = self
            .applied
            .get(acknowledged..)
            .ok_or(HistoryError::AheadOfHistory {
                acknowledged,
                len: self.applied.len(),
            })?;

        let mut rebased = op.clone();
        for accepted in concurrent {
            if rebased.is_noop() {
                break;
            }
            rebased = transform(&rebased, accepted).0;
        }
        debug!(
            acknowledged,
            concurrent = concurrent.len(),
            noop = rebased.is_noop(),
            "rebased incoming operation"
        );
        Ok(rebased)
    }

    /// Rebase `op` and record it. Returns the operation to broadcast.
    ///
    /// A rebased no-op is still recorded so that acknowledgement counts
    /// line up with what each client has been sent.
    pub fn accept(&mut self, op: &Operation, acknowledged: usize) -> Result<Operation, HistoryError> {
        let rebased = self.rebase(op, acknowledged)?;
        self.applied.push(rebased.clone());
        Ok(rebased)
    }
}

/// Rebase a client's pending queue onto an incoming operation.
///
/// `pending` has been applied locally but not yet acknowledged; `incoming`
/// was produced against the state before the first pending operation.
/// Returns the pending queue rewritten to follow `incoming`, and `incoming`
/// rewritten to apply on top of the local state.
pub fn rebase_pending(pending: &[Operation], incoming: &Operation) -> (Vec<Operation>, Operation) {
    let mut incoming = incoming.clone();
    let rebased: Vec<Operation> = pending
        .iter()
        .map(|local| {
            let (local, next) = transform(local, &incoming);
            incoming = next;
            local
        })
        .collect();
    (rebased, incoming)
}
