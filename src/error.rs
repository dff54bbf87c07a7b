//! Error types for loading and merging reports.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Fewer documents than the operation requires.
    #[error("cannot merge {actual} report(s): at least {minimum} required")]
    InvalidInputCount { minimum: usize, actual: usize },

    /// A required field is absent or has the wrong shape.
    #[error("report #{index} is malformed: field `{field}` {reason}")]
    MalformedReport {
        index: usize,
        field: String,
        reason: String,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize merged report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl MergeError {
    pub fn malformed(index: usize, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedReport {
            index,
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = MergeError> = std::result::Result<T, E>;
