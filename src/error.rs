//! Error types.
//!
//! Two layers:
//!
//! - typed library errors (`FitError` for the numeric core, `IngestError` for
//!   file readers) that callers can match on
//! - `AppError`, the process-level error carrying a message and an exit code
//!
//! Exit codes used by the binary:
//! - 2: input / IO problems
//! - 3: no usable data
//! - 4: numeric / fit failure

use std::path::PathBuf;

use crate::domain::Segment;

/// Failures of the split / fit / evaluate core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// `x` and `y` must be paired by index.
    #[error("x and y lengths differ (x: {x_len}, y: {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },

    /// A segment has fewer than 2 distinct x-values, so its slope is undefined.
    #[error("{segment} segment is degenerate: {n} point(s), need at least 2 distinct x-values")]
    DegenerateSegment { segment: Segment, n: usize },

    /// The full y sequence is constant, so R² is undefined.
    #[error("y has zero variance; coefficient of determination is undefined")]
    DegenerateVariance,
}

/// Failures of the dataset / threshold readers.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed threshold file '{}': {reason}", path.display())]
    MalformedThreshold { path: PathBuf, reason: String },

    #[error(
        "dataset '{}' contains no usable (x, y) lines ({skipped} malformed line(s) skipped)",
        path.display()
    )]
    EmptyDataset { path: PathBuf, skipped: usize },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(4, format!("Fit failed: {err}"))
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        let code = match err {
            IngestError::EmptyDataset { .. } => 3,
            IngestError::Io { .. } | IngestError::MalformedThreshold { .. } => 2,
        };
        AppError::new(code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
