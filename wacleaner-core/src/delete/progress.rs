use std::path::PathBuf;

/// Update sent while a batch deletion runs
#[derive(Debug, Clone)]
pub enum DeleteMessage {
    /// Batch accepted; deletion is in progress
    Started { total: usize },
    /// A file was removed
    Deleted { path: PathBuf, size: u64 },
    /// A file could not be removed; the batch continues
    Failed { path: PathBuf, error: String },
    /// Running totals
    Progress(DeleteProgress),
    /// Batch finished; deletion is no longer in progress
    Completed(DeleteReport),
}

impl DeleteMessage {
    /// In-progress flag implied by this message, if it changes it
    pub fn in_progress(&self) -> Option<bool> {
        match self {
            DeleteMessage::Started { .. } => Some(true),
            DeleteMessage::Completed(_) => Some(false),
            _ => None,
        }
    }
}

/// Running totals of a batch deletion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteProgress {
    pub total: usize,
    pub completed: usize,
    pub bytes_freed: u64,
    pub failures: usize,
}

impl DeleteProgress {
    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

/// Final outcome of a batch deletion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<PathBuf>,
    pub bytes_freed: u64,
    /// Files that could not be removed, with the reason
    pub failures: Vec<(PathBuf, String)>,
    /// At least one failure was a permission error
    pub permission_denied: bool,
}

impl DeleteReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary of the failures, if any
    pub fn failure_summary(&self) -> Option<String> {
        match self.failures.as_slice() {
            [] => None,
            [(path, error)] => Some(format!("Delete failed: {}: {}", path.display(), error)),
            [(_, first), ..] => Some(format!(
                "{} deletions failed (first: {})",
                self.failures.len(),
                first
            )),
        }
    }
}
