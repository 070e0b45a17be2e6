//! Error types for path parsing and tree traversal.

use super::ast::Path;
use crate::document::node::Kind;
use thiserror::Error;

/// Errors raised while walking a tree along a path.
///
/// Every variant carries the prefix of the path that was resolved before the
/// failing segment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrabError {
    #[error("failed to traverse tree, expected a {expected} but found type {found} at {path}")]
    TypeMismatch {
        expected: Kind,
        found: Kind,
        path: Path,
    },

    #[error("no key '{key}' found in map at {path}, available keys: {}", .available.join(", "))]
    KeyNotFound {
        key: String,
        available: Vec<String>,
        path: Path,
    },

    #[error("there is no entry {field}={value} in the list at {path}")]
    RecordNotFound {
        field: String,
        value: String,
        path: Path,
    },

    #[error("found {count} entries matching {field}={value} in the list at {path}, expected exactly one")]
    RecordAmbiguous {
        field: String,
        value: String,
        count: usize,
        path: Path,
    },

    #[error("failed to traverse tree, provided simple list index {index} is not in range: 0..{} at {path}", last_index(.len))]
    IndexOutOfRange { index: isize, len: usize, path: Path },

    #[error("failed to traverse tree, the provided path segment {segment} at {path} is invalid")]
    InvalidSegment { segment: String, path: Path },
}

/// Upper bound of the valid index range; `-1` for an empty list.
fn last_index(len: &usize) -> i64 {
    *len as i64 - 1
}

impl GrabError {
    /// Returns the resolved-so-far path at the point of failure.
    pub fn path(&self) -> &Path {
        match self {
            GrabError::TypeMismatch { path, .. }
            | GrabError::KeyNotFound { path, .. }
            | GrabError::RecordNotFound { path, .. }
            | GrabError::RecordAmbiguous { path, .. }
            | GrabError::IndexOutOfRange { path, .. }
            | GrabError::InvalidSegment { path, .. } => path,
        }
    }
}

/// Errors raised while parsing a path string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("empty path segment at position {position} in '{input}'")]
    EmptySegment { input: String, position: usize },

    #[error("invalid document index '{found}' in '{input}'")]
    InvalidDocumentIndex { input: String, found: String },

    #[error("invalid list index '{found}' in '{input}'")]
    InvalidIndex { input: String, found: String },

    #[error("cannot resolve '{segment}' in '{input}': {reason}")]
    Unresolvable {
        input: String,
        segment: String,
        reason: String,
    },
}

/// Either a path parse failure or a traversal failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error(transparent)]
    Parse(#[from] PathParseError),

    #[error(transparent)]
    Grab(#[from] GrabError),
}
