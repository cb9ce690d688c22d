use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use jwalk::WalkDir;

use crate::error::{Result, SweepError};

/// Raw directory entry as returned by a listing.
///
/// `is_file` is true for regular files and for symlinks that resolve to one.
/// Dangling links and links to directories are not files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub path: PathBuf,
    pub is_file: bool,
}

/// Size and modification time of a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub modified_ms: i64,
}

/// Filesystem operations the listing and deletion code depend on
pub trait Filesystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Immediate children of a directory
    fn list_entries(&self, path: &Path) -> Result<Vec<RawEntry>>;

    fn stat(&self, path: &Path) -> Result<FileStat>;

    fn delete(&self, path: &Path) -> Result<()>;

    /// Total bytes of all regular files below `path` (0 if it does not exist)
    fn directory_size(&self, path: &Path) -> u64;
}

/// `Filesystem` backed by the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<RawEntry>> {
        let meta = std::fs::metadata(path).map_err(|e| SweepError::from_io(e, path))?;
        if !meta.is_dir() {
            return Err(SweepError::DirectoryNotFound(path.to_path_buf()));
        }

        let walker = WalkDir::new(path)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .min_depth(1)
            .max_depth(1);

        let mut entries = Vec::new();
        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(e) => {
                    log::warn!("Skipping unreadable entry in {}: {}", path.display(), e);
                    continue;
                }
            };
            let file_type = entry.file_type();
            let entry_path = entry.path();
            let is_file = file_type.is_file()
                || (file_type.is_symlink()
                    && std::fs::metadata(&entry_path)
                        .map(|m| m.is_file())
                        .unwrap_or(false));
            entries.push(RawEntry {
                path: entry_path,
                is_file,
            });
        }

        Ok(entries)
    }

    fn stat(&self, path: &Path) -> Result<FileStat> {
        let meta = std::fs::metadata(path).map_err(|e| SweepError::from_io(e, path))?;
        let modified_ms = meta.modified().map(to_millis).unwrap_or(0);

        Ok(FileStat {
            size: meta.len(),
            modified_ms,
        })
    }

    fn delete(&self, path: &Path) -> Result<()> {
        std::fs::remove_file(path).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => SweepError::PermissionDenied(path.to_path_buf()),
            _ => SweepError::DeleteFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })
    }

    fn directory_size(&self, path: &Path) -> u64 {
        if !path.is_dir() {
            return 0;
        }

        WalkDir::new(path)
            .skip_hidden(false)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.metadata().ok())
            .map(|meta| meta.len())
            .sum()
    }
}

/// Milliseconds since the Unix epoch (negative before it)
pub fn to_millis(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_millis() as i64,
        Err(e) => -(e.duration().as_millis() as i64),
    }
}
