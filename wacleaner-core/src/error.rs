use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to delete {path}: {reason}")]
    DeleteFailed { path: PathBuf, reason: String },

    #[error("Invalid date range: start {start_ms} is after end {end_ms}")]
    InvalidDateRange { start_ms: i64, end_ms: i64 },

    #[error("No files selected")]
    NothingSelected,

    #[error("A deletion is already running")]
    DeleteInProgress,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SweepError {
    /// Classify an IO error raised while touching `path`
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => SweepError::DirectoryNotFound(path.into()),
            std::io::ErrorKind::PermissionDenied => SweepError::PermissionDenied(path.into()),
            _ => SweepError::Io(err),
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, SweepError::PermissionDenied(_))
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
