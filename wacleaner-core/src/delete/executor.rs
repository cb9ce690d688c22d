use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};

use super::progress::{DeleteMessage, DeleteProgress, DeleteReport};
use crate::entry::FileEntry;
use crate::error::SweepError;
use crate::fs::Filesystem;

/// Deletion configuration
#[derive(Debug, Clone)]
pub struct DeleteConfig {
    /// Number of worker threads (0 = auto)
    pub num_workers: usize,
}

impl Default for DeleteConfig {
    fn default() -> Self {
        Self {
            num_workers: 0, // auto
        }
    }
}

/// Per-file outcome reported by a worker
enum Outcome {
    Deleted { path: PathBuf, size: u64 },
    Failed { path: PathBuf, error: SweepError },
}

/// Batch deletion executor
pub struct Deleter {
    fs: Arc<dyn Filesystem>,
    config: DeleteConfig,
}

impl Deleter {
    pub fn new(fs: Arc<dyn Filesystem>, config: DeleteConfig) -> Self {
        Self { fs, config }
    }

    fn worker_count(&self, jobs: usize) -> usize {
        let wanted = if self.config.num_workers > 0 {
            self.config.num_workers
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        };
        wanted.clamp(1, jobs.max(1))
    }

    /// Delete every entry in the background.
    /// Returns a receiver for progress updates and the handle yielding the final report.
    pub fn delete(
        self,
        entries: Vec<FileEntry>,
    ) -> (Receiver<DeleteMessage>, JoinHandle<DeleteReport>) {
        let (tx, rx) = crossbeam_channel::unbounded();

        let handle = std::thread::spawn(move || self.delete_sync(entries, tx));

        (rx, handle)
    }

    /// Synchronous batch deletion (runs in thread)
    fn delete_sync(self, entries: Vec<FileEntry>, tx: Sender<DeleteMessage>) -> DeleteReport {
        let total = entries.len();
        let workers = self.worker_count(total);
        let _ = tx.send(DeleteMessage::Started { total });
        log::info!("Deleting {} files with {} workers", total, workers);

        let (job_tx, job_rx) = crossbeam_channel::unbounded::<FileEntry>();
        let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded::<Outcome>();

        for entry in entries {
            let _ = job_tx.send(entry);
        }
        drop(job_tx);

        let handles: Vec<JoinHandle<()>> = (0..workers)
            .map(|_| {
                let jobs = job_rx.clone();
                let outcomes = outcome_tx.clone();
                let fs = Arc::clone(&self.fs);
                std::thread::spawn(move || {
                    for entry in jobs {
                        let outcome = match fs.delete(&entry.path) {
                            Ok(()) => Outcome::Deleted {
                                path: entry.path,
                                size: entry.size,
                            },
                            Err(error) => Outcome::Failed {
                                path: entry.path,
                                error,
                            },
                        };
                        if outcomes.send(outcome).is_err() {
                            break;
                        }
                    }
                })
            })
            .collect();
        drop(outcome_tx);

        let mut report = DeleteReport::default();
        let mut progress = DeleteProgress {
            total,
            ..DeleteProgress::default()
        };

        for outcome in outcome_rx {
            progress.completed += 1;
            match outcome {
                Outcome::Deleted { path, size } => {
                    progress.bytes_freed += size;
                    report.bytes_freed += size;
                    report.deleted.push(path.clone());
                    let _ = tx.send(DeleteMessage::Deleted { path, size });
                }
                Outcome::Failed { path, error } => {
                    log::warn!("Could not delete {}: {}", path.display(), error);
                    progress.failures += 1;
                    if error.is_permission_denied() {
                        report.permission_denied = true;
                    }
                    let message = error.to_string();
                    report.failures.push((path.clone(), message.clone()));
                    let _ = tx.send(DeleteMessage::Failed {
                        path,
                        error: message,
                    });
                }
            }
            let _ = tx.send(DeleteMessage::Progress(progress.clone()));
        }

        for handle in handles {
            let _ = handle.join();
        }

        let _ = tx.send(DeleteMessage::Completed(report.clone()));
        report
    }
}
