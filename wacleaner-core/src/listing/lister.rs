use std::path::Path;
use std::sync::Arc;

use crossbeam_channel::Receiver;

use super::request::{ListingRequest, ListingResult};
use crate::entry::FileEntry;
use crate::error::{Result, SweepError};
use crate::fs::Filesystem;
use crate::sort::{self, DateRange, SortCriteria};

/// Listing options
#[derive(Debug, Clone, Default)]
pub struct ListingConfig {
    /// Include dot-files such as `.nomedia`
    pub include_hidden: bool,
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// List the regular files directly inside `path`, filtered by `range` and sorted.
///
/// A missing directory yields an empty listing: the Sent and Private folders
/// are optional.
pub fn list_files(
    fs: &dyn Filesystem,
    path: &Path,
    criteria: SortCriteria,
    range: Option<&DateRange>,
    config: &ListingConfig,
) -> Result<Vec<FileEntry>> {
    if !fs.exists(path) {
        log::debug!("{} does not exist, empty listing", path.display());
        return Ok(Vec::new());
    }

    let raw = match fs.list_entries(path) {
        Ok(raw) => raw,
        Err(SweepError::DirectoryNotFound(_)) => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut entries = Vec::with_capacity(raw.len());
    for item in raw {
        if !item.is_file || (!config.include_hidden && is_hidden(&item.path)) {
            continue;
        }
        match fs.stat(&item.path) {
            Ok(stat) => entries.push(FileEntry::new(item.path, stat.size, stat.modified_ms)),
            Err(e) => log::warn!("Skipping {}: {}", item.path.display(), e),
        }
    }

    Ok(sort::apply(entries, criteria, range))
}

/// Runs listing requests on background threads
#[derive(Clone)]
pub struct Lister {
    fs: Arc<dyn Filesystem>,
    config: ListingConfig,
}

impl Lister {
    pub fn new(fs: Arc<dyn Filesystem>, config: ListingConfig) -> Self {
        Self { fs, config }
    }

    /// Run one listing synchronously
    pub fn run(&self, request: &ListingRequest) -> ListingResult {
        let outcome = list_files(
            self.fs.as_ref(),
            &request.path,
            request.criteria,
            request.range.as_ref(),
            &self.config,
        );

        let (entries, error) = match outcome {
            Ok(entries) => (entries, None),
            Err(e) => {
                log::warn!("Listing {} failed: {}", request.path.display(), e);
                (Vec::new(), Some(e))
            }
        };

        ListingResult {
            generation: request.generation,
            view: request.view,
            entries,
            error,
        }
    }

    /// Start one worker per request.
    /// Results arrive in completion order; the channel closes once every worker is done.
    pub fn spawn(&self, requests: Vec<ListingRequest>) -> Receiver<ListingResult> {
        let (tx, rx) = crossbeam_channel::unbounded();

        for request in requests {
            let tx = tx.clone();
            let lister = self.clone();
            std::thread::spawn(move || {
                let result = lister.run(&request);
                let _ = tx.send(result);
            });
        }

        rx
    }
}
