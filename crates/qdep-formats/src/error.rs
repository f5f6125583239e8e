//! Error types for the interchange formats.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading or writing interchange files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// Input file does not exist.
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// Any other filesystem failure.
    #[error("I/O error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// Edge line with the wrong token count or non-integer fields.
    #[error("Malformed edge at line {line} ('{content}'): {reason}")]
    MalformedEdge {
        line: usize,
        content: String,
        reason: String,
    },

    /// JSON could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(String),

    /// Attribute keys are not the dense range `0..n`.
    #[error("Attribute keys must be dense from 0: expected node {expected}, found {found}")]
    NonDenseAttributes { expected: usize, found: usize },

    /// Qubit field is not convertible to a float.
    #[error("Node {node}: field '{field}' is not numeric: '{value}'")]
    InvalidQubit {
        node: usize,
        field: &'static str,
        value: String,
    },
}

impl From<serde_json::Error> for FormatError {
    fn from(e: serde_json::Error) -> Self {
        FormatError::Json(e.to_string())
    }
}

impl FormatError {
    /// Wrap an I/O error, keeping `NotFound` distinct.
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            FormatError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            FormatError::Io {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        }
    }
}

/// Result type for format operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Read a whole file, mapping I/O failures to [`FormatError`].
pub(crate) fn read_file(path: &Path) -> FormatResult<String> {
    std::fs::read_to_string(path).map_err(|e| FormatError::io(path, &e))
}

/// Write a whole file, mapping I/O failures to [`FormatError`].
pub(crate) fn write_file(path: &Path, contents: &str) -> FormatResult<()> {
    std::fs::write(path, contents).map_err(|e| FormatError::io(path, &e))
}
