use indicatif::{ProgressBar, ProgressStyle};
use wacleaner_core::{
    DeleteMessage, DeleteReport, Deleter, DetailsState, FileEntry, Lister, ListingRequest,
    SubView, SweepError, format_size,
};

/// Run listing requests in the background and commit their results.
/// Returns the sub-views whose directory could not be read.
pub fn load_listings(
    state: &mut DetailsState,
    lister: &Lister,
    requests: Vec<ListingRequest>,
) -> Vec<(SubView, SweepError)> {
    let mut errors = Vec::new();

    for mut result in lister.spawn(requests) {
        let view = result.view;
        let error = result.error.take();
        if state.apply_listing(result)
            && let Some(error) = error
        {
            errors.push((view, error));
        }
    }

    errors
}

fn progress_bar(show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(0);
    let template = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}

/// Delete `batch`, feeding every update into `state`, then reload the listings.
pub fn run_delete(
    state: &mut DetailsState,
    lister: &Lister,
    deleter: Deleter,
    batch: Vec<FileEntry>,
    show_progress: bool,
) -> DeleteReport {
    let pb = progress_bar(show_progress);
    let (rx, handle) = deleter.delete(batch);
    let mut reload = None;

    for message in rx {
        match &message {
            DeleteMessage::Started { total } => pb.set_length(*total as u64),
            DeleteMessage::Deleted { path, .. } => {
                pb.set_message(
                    path.file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default(),
                );
            }
            DeleteMessage::Failed { path, error } => {
                pb.suspend(|| log::warn!("Could not delete {}: {}", path.display(), error));
            }
            DeleteMessage::Progress(progress) => {
                pb.set_position(progress.completed as u64);
                if progress.is_done() {
                    pb.set_message(format!("{} freed", format_size(progress.bytes_freed)));
                }
            }
            DeleteMessage::Completed(_) => pb.finish_and_clear(),
        }
        if let Some(requests) = state.apply_delete_message(message) {
            reload = Some(requests);
        }
    }

    let report = match handle.join() {
        Ok(report) => report,
        Err(_) => state.last_report().cloned().unwrap_or_default(),
    };

    if state.take_reload_request()
        && let Some(requests) = reload
    {
        for (view, error) in load_listings(state, lister, requests) {
            log::warn!("Reloading {} failed: {}", view.label(), error);
        }
    }

    report
}
