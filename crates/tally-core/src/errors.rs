//! Error types for the analytics engine.

use std::path::PathBuf;

/// Analytics errors.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Report format name not recognised.
    #[error("unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Trend analysis needs more suite runs than the collection holds.
    #[error("insufficient data: need at least {required} test suite results for trend analysis, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A rate or average was requested over an empty denominator.
    #[error("division undefined: {quantity} has no denominator (zero tests or suites)")]
    DivisionUndefined { quantity: &'static str },

    /// Writing a report to disk failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading an input file failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not a recognised suite result document.
    #[error("invalid input {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// JSON serialization failed while rendering.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AnalyticsError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Caller asked for something that cannot be produced
            Self::UnsupportedFormat { .. } => 2,
            Self::Config { .. } => 2,

            // Data shape
            Self::InsufficientData { .. } => 3,
            Self::DivisionUndefined { .. } => 3,

            // Input/output
            Self::Read { .. } => 4,
            Self::Parse { .. } => 4,
            Self::Write { .. } => 5,

            Self::Serialize(_) => 6,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
