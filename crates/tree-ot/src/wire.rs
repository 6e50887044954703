//! JSON encoding of operations for the transport layer.
//!
//! ```json
//! {"opType": "insert", "path": [0, 2], "atomicOp": {"type": "objectOperation", "payload": {...}}}
//! ```
//!
//! Clients wrap each operation in an [`Envelope`] carrying how many server
//! operations they had applied when they produced it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::operation::{normalise, Operation, OperationError};

#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed operation JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] OperationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub acknowledged_server_ops: usize,
    pub operation: Operation,
}

pub fn encode(op: &Operation) -> Result<String, WireError> {
    Ok(serde_json::to_string(op)?)
}

/// Decode and validate an operation. An empty path decodes to the no-op.
pub fn decode(json: &str) -> Result<Operation, WireError> {
    let op: Operation = serde_json::from_str(json)?;
    op.validate()?;
    Ok(normalise(op))
}

pub fn encode_envelope(envelope: &Envelope) -> Result<String, WireError> {
    Ok(serde_json::to_string(envelope)?)
}

pub fn decode_envelope(json: &str) -> Result<Envelope, WireError> {
    let envelope: Envelope = serde_json::from_str(json)?;
    envelope.operation.validate()?;
    Ok(Envelope {
        acknowledged_server_ops: envelope.acknowledged_server_ops,
        operation: normalise(envelope.operation),
    })
}
