//! Dataset error types.

use thiserror::Error;

use qdep_formats::FormatError;
use qdep_ir::IrError;

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Broad failure categories callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input or sample is missing.
    NotFound,
    /// Input could not be parsed.
    Format,
    /// Input parsed but is semantically invalid.
    Validation,
    /// Filesystem failure other than a missing file.
    Io,
}

/// Errors that can occur while planning, building or reading a dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    /// A required file or sample does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Interchange file error.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Gate model error.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Gate type tag missing from the feature map.
    #[error("Unknown gate type '{gate}' at node {node}")]
    UnknownGateType { gate: String, node: usize },

    /// Position past the end of the dataset.
    #[error("Position {position} out of range for a dataset of {len} samples")]
    PositionOutOfRange { position: usize, len: usize },

    /// Other semantic validation failure.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Sample or manifest (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DatasetError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DatasetError::NotFound(_) => ErrorKind::NotFound,
            DatasetError::Format(e) => match e {
                FormatError::NotFound { .. } => ErrorKind::NotFound,
                FormatError::Io { .. } => ErrorKind::Io,
                FormatError::NonDenseAttributes { .. } | FormatError::InvalidQubit { .. } => {
                    ErrorKind::Validation
                }
                _ => ErrorKind::Format,
            },
            DatasetError::Ir(_)
            | DatasetError::UnknownGateType { .. }
            | DatasetError::PositionOutOfRange { .. }
            | DatasetError::Validation(_) => ErrorKind::Validation,
            DatasetError::Config(ConfigError::Io(_)) | DatasetError::Io(_) => ErrorKind::Io,
            DatasetError::Config(ConfigError::Parse(_)) | DatasetError::Serialization(_) => {
                ErrorKind::Format
            }
            DatasetError::Config(ConfigError::Validation(_)) => ErrorKind::Validation,
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(e: serde_json::Error) -> Self {
        DatasetError::Serialization(e.to_string())
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read configuration: {0}")]
    Io(String),

    /// Config file could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A value is out of range.
    #[error("Invalid configuration: {0}")]
    Validation(String),
}
