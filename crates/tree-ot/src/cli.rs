//! Helpers behind the `tree-ot-transform` binary.

use thiserror::Error;

use crate::operation::{normalise, Operation};
use crate::transform::{transform, try_transform, TransformError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("expected a JSON array of two operations: {0}")]
    Input(#[from] serde_json::Error),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Options read from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Reject malformed operations instead of transforming them anyway.
    pub strict: bool,
    pub pretty: bool,
}

impl Options {
    /// Parse flags, returning the first unrecognised argument as the error.
    pub fn from_args<I, S>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Options::default();
        for arg in args {
            match arg.as_ref() {
                "--strict" => options.strict = true,
                "--pretty" => options.pretty = true,
                other => return Err(other.to_string()),
            }
        }
        Ok(options)
    }
}

/// Transform a `[a, b]` JSON pair and return `[a', b']` as JSON.
pub fn transform_pair_json(input: &str, options: Options) -> Result<String, CliError> {
    let (a, b): (Operation, Operation) = serde_json::from_str(input)?;
    let (a, b) = (normalise(a), normalise(b));
    let pair = if options.strict {
        try_transform(&a, &b)?
    } else {
        transform(&a, &b)
    };
    let out = if options.pretty {
        serde_json::to_string_pretty(&pair)?
    } else {
        serde_json::to_string(&pair)?
    };
    Ok(out)
}
