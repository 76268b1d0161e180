use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the issuegraph workspace.
///
/// Build-time failures (empty or malformed input) abort the run; there is no
/// partial index. Query operations never produce an error.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IssuegraphError {
    /// No records were supplied.
    #[error("no issue records supplied")]
    EmptyInput,

    /// A record is missing a required timestamp or carries an unparseable one.
    #[error("malformed record #{index}: {reason}")]
    MalformedInput {
        /// Zero-based position of the offending record in the input sequence.
        index: usize,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// The serialized input could not be decoded into records.
    #[error("parse error: {0}")]
    Parse(String),

    /// Reading input or writing an artifact failed.
    #[error("io error at {path}: {msg}")]
    Io {
        /// Path that was being read or written.
        path: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl IssuegraphError {
    /// Helper: build a `MalformedInput` error for the record at `index`.
    #[must_use]
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            index,
            reason: reason.into(),
        }
    }

    /// Helper: build an `Io` error for a path.
    #[must_use]
    pub fn io(path: impl AsRef<std::path::Path>, msg: impl ToString) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            msg: msg.to_string(),
        }
    }

    /// Returns true if the error was raised while building the interval index.
    #[must_use]
    pub const fn is_build_error(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::MalformedInput { .. })
    }
}

impl From<serde_json::Error> for IssuegraphError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
