use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, converting or writing a height grid
#[derive(Debug, Error)]
pub enum GridError {
    /// A token on a text line is not a usable number. Line and column are 1-based,
    /// column counts tokens, not characters.
    #[error("parse error at line {line}, column {column}: {token:?} {reason}")]
    Parse {
        line: usize,
        column: usize,
        token: String,
        reason: String,
    },

    /// Opening, reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A heights document could not be encoded or decoded
    #[error("invalid heights document {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The output path is missing, cannot be derived, or would clobber the input
    #[error("output path error: {0}")]
    OutputPath(String),
}

impl GridError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GridError::Io { path: path.into(), source }
    }
}

/// Type alias for Results using GridError
pub type Result<T> = std::result::Result<T, GridError>;
