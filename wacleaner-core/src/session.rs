//! Details view state for one category.
//!
//! `DetailsState` is owned by a single foreground thread. Background listing and
//! deletion workers only produce `ListingResult`s and `DeleteMessage`s, which the
//! owner feeds back through `apply_listing` and `apply_delete_message`.

use std::path::Path;

use crate::catalog::{Category, SubView};
use crate::delete::{DeleteMessage, DeleteReport};
use crate::entry::FileEntry;
use crate::error::{Result, SweepError};
use crate::listing::{ListingRequest, ListingResult};
use crate::selection::Selection;
use crate::sort::{DateRange, SortCriteria};

pub struct DetailsState {
    category: Category,
    /// Indexed by `SubView::index`
    lists: [Vec<FileEntry>; 3],
    selection: Selection,
    criteria: SortCriteria,
    range: Option<DateRange>,
    /// Bumped on every new round of listing requests
    generation: u64,
    in_progress: bool,
    reload_requested: bool,
    last_report: Option<DeleteReport>,
}

impl DetailsState {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            lists: Default::default(),
            selection: Selection::new(),
            criteria: SortCriteria::default(),
            range: None,
            generation: 0,
            in_progress: false,
            reload_requested: false,
            last_report: None,
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn active_view(&self) -> SubView {
        self.selection.view()
    }

    pub fn list(&self, view: SubView) -> &[FileEntry] {
        &self.lists[view.index()]
    }

    /// Entries of the active sub-view
    pub fn visible(&self) -> &[FileEntry] {
        self.list(self.active_view())
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn criteria(&self) -> SortCriteria {
        self.criteria
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn last_report(&self) -> Option<&DeleteReport> {
        self.last_report.as_ref()
    }

    /// Total bytes of the active sub-view
    pub fn total_size(&self) -> u64 {
        self.visible().iter().map(|e| e.size).sum()
    }

    // --- Listing ---

    /// Start a new listing round: one request per available sub-view.
    /// Results of earlier rounds are ignored from now on.
    pub fn request_listings(&mut self) -> Vec<ListingRequest> {
        self.generation += 1;
        self.category
            .sub_views()
            .into_iter()
            .map(|view| ListingRequest {
                generation: self.generation,
                view,
                path: self.category.path_for(view),
                criteria: self.criteria,
                range: self.range,
            })
            .collect()
    }

    /// Commit a finished listing. Returns false if it belongs to a superseded round.
    pub fn apply_listing(&mut self, result: ListingResult) -> bool {
        if result.generation != self.generation {
            log::debug!(
                "Discarding stale {} listing (generation {} < {})",
                result.view.label(),
                result.generation,
                self.generation
            );
            return false;
        }
        if !self.category.has_view(result.view) {
            return false;
        }

        self.lists[result.view.index()] = result.entries;
        if result.view == self.active_view() {
            self.selection.retain_present(&self.lists[result.view.index()]);
        }
        true
    }

    pub fn set_sort(&mut self, criteria: SortCriteria) -> Vec<ListingRequest> {
        self.criteria = criteria;
        self.request_listings()
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) -> Vec<ListingRequest> {
        self.range = range;
        self.request_listings()
    }

    /// Drop the date filter and the selection before sort options are edited
    pub fn reset_filters(&mut self) -> Vec<ListingRequest> {
        self.selection.clear();
        self.set_date_range(None)
    }

    // --- Selection ---

    /// Make `view` active. Ignored for sub-views the category does not have.
    pub fn switch_view(&mut self, view: SubView) -> bool {
        if !self.category.has_view(view) {
            return false;
        }
        self.selection.switch_view(view);
        true
    }

    /// Toggle an entry of the active sub-view. Returns false if it is not listed there.
    pub fn toggle(&mut self, path: &Path) -> bool {
        let entry = match self.visible().iter().find(|e| e.path == path) {
            Some(entry) => entry.clone(),
            None => return false,
        };
        self.selection.toggle(&entry);
        true
    }

    pub fn toggle_select_all(&mut self) {
        let view = self.active_view().index();
        self.selection.toggle_select_all(&self.lists[view]);
    }

    pub fn select_all(&mut self) {
        let view = self.active_view().index();
        self.selection.select_all(&self.lists[view]);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_entries(&self) -> Vec<FileEntry> {
        self.selection.selected_entries(self.visible())
    }

    // --- Deletion ---

    /// Hand out the selected entries for deletion and mark the batch in progress.
    /// Listings requested before this point are stale: they may still contain the batch.
    pub fn begin_delete(&mut self) -> Result<Vec<FileEntry>> {
        if self.in_progress {
            return Err(SweepError::DeleteInProgress);
        }
        let batch = self.selected_entries();
        if batch.is_empty() {
            return Err(SweepError::NothingSelected);
        }
        self.generation += 1;
        self.in_progress = true;
        self.last_report = None;
        Ok(batch)
    }

    /// Fold a deletion update into the state.
    /// On completion returns the listing requests that reload the category.
    pub fn apply_delete_message(&mut self, message: DeleteMessage) -> Option<Vec<ListingRequest>> {
        match message {
            DeleteMessage::Started { .. } => {
                self.in_progress = true;
                None
            }
            DeleteMessage::Deleted { path, .. } => {
                self.remove_entry(&path);
                None
            }
            DeleteMessage::Failed { .. } | DeleteMessage::Progress(_) => None,
            DeleteMessage::Completed(report) => {
                for path in &report.deleted {
                    self.remove_entry(path);
                }
                self.selection.clear();
                self.in_progress = false;
                self.reload_requested = true;
                self.last_report = Some(report);
                Some(self.request_listings())
            }
        }
    }

    /// Remove a deleted file from its list and from the selection together
    fn remove_entry(&mut self, path: &Path) {
        for list in &mut self.lists {
            list.retain(|e| e.path != path);
        }
        self.selection.evict([path]);
    }

    /// Whether listings of this category changed on disk; resets the signal
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::resolve_categories;
    use crate::delete::{DeleteConfig, Deleter};
    use crate::fs::StdFilesystem;
    use crate::listing::{Lister, ListingConfig};
    use crate::sort::SortKey;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn images_state(home: &Path) -> DetailsState {
        let images = resolve_categories(home).remove(0);
        DetailsState::new(images)
    }

    fn entry(dir: &Path, name: &str, size: u64, modified_ms: i64) -> FileEntry {
        FileEntry::new(dir.join(name), size, modified_ms)
    }

    fn result(generation: u64, view: SubView, entries: Vec<FileEntry>) -> ListingResult {
        ListingResult {
            generation,
            view,
            entries,
            error: None,
        }
    }

    #[test]
    fn test_requests_cover_available_views() {
        let home = PathBuf::from("/home/WhatsApp");
        let mut state = images_state(&home);
        let requests = state.request_listings();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.generation == 1));
        assert!(requests[1].path.ends_with("WhatsApp Images/Sent"));

        let statuses = resolve_categories(&home).remove(4);
        let mut state = DetailsState::new(statuses);
        assert_eq!(state.request_listings().len(), 1);
        assert!(!state.switch_view(SubView::Sent));
        assert_eq!(state.active_view(), SubView::Received);
    }

    #[test]
    fn test_stale_listing_is_discarded() {
        let dir = PathBuf::from("/m");
        let mut state = images_state(Path::new("/home/WhatsApp"));
        state.request_listings();
        let newer = state.set_sort(SortCriteria::new(SortKey::Size, false));
        assert_eq!(newer[0].generation, 2);

        assert!(!state.apply_listing(result(1, SubView::Received, vec![entry(&dir, "old", 1, 0)])));
        assert!(state.visible().is_empty());

        assert!(state.apply_listing(result(2, SubView::Received, vec![entry(&dir, "new", 1, 0)])));
        assert_eq!(state.visible()[0].name, "new");
    }

    #[test]
    fn test_listing_replaces_instead_of_appending() {
        let dir = PathBuf::from("/m");
        let mut state = images_state(Path::new("/home/WhatsApp"));
        state.request_listings();
        state.apply_listing(result(
            1,
            SubView::Sent,
            vec![entry(&dir, "a", 1, 0), entry(&dir, "b", 1, 0)],
        ));

        state.request_listings();
        state.apply_listing(result(2, SubView::Sent, vec![entry(&dir, "c", 1, 0)]));
        assert_eq!(state.list(SubView::Sent).len(), 1);
    }

    #[test]
    fn test_select_all_only_covers_active_view() {
        let dir = PathBuf::from("/m");
        let mut state = images_state(Path::new("/home/WhatsApp"));
        state.request_listings();
        state.apply_listing(result(1, SubView::Received, vec![entry(&dir, "r", 1, 0)]));
        state.apply_listing(result(
            1,
            SubView::Sent,
            vec![entry(&dir, "s1", 1, 0), entry(&dir, "s2", 1, 0)],
        ));

        state.switch_view(SubView::Sent);
        state.toggle_select_all();
        assert_eq!(state.selection().len(), 2);
        assert!(!state.selection().contains_path(&dir.join("r")));

        state.switch_view(SubView::Received);
        assert!(state.selection().is_empty());
        assert!(!state.selection().is_all_selected());
    }

    #[test]
    fn test_toggle_ignores_entries_outside_active_view() {
        let dir = PathBuf::from("/m");
        let mut state = images_state(Path::new("/home/WhatsApp"));
        state.request_listings();
        state.apply_listing(result(1, SubView::Sent, vec![entry(&dir, "s", 1, 0)]));

        assert!(!state.toggle(&dir.join("s")));
        assert!(state.selection().is_empty());
        assert!(matches!(state.begin_delete(), Err(SweepError::NothingSelected)));
    }

    #[test]
    fn test_listing_from_before_delete_is_dropped() {
        let dir = PathBuf::from("/m");
        let mut state = images_state(Path::new("/home/WhatsApp"));
        state.request_listings();
        state.apply_listing(result(
            1,
            SubView::Received,
            vec![entry(&dir, "a", 1, 0), entry(&dir, "b", 1, 0)],
        ));
        let in_flight = state.set_sort(SortCriteria::new(SortKey::Name, false));

        assert!(state.toggle(&dir.join("a")));
        state.begin_delete().unwrap();
        state.apply_delete_message(DeleteMessage::Deleted {
            path: dir.join("a"),
            size: 1,
        });

        let accepted = state.apply_listing(result(
            in_flight[0].generation,
            SubView::Received,
            vec![entry(&dir, "a", 1, 0), entry(&dir, "b", 1, 0)],
        ));
        assert!(!accepted);
        let names: Vec<&str> = state.visible().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b"]);
        assert!(state.in_progress());
    }

    #[test]
    fn test_second_delete_refused_while_running() {
        let dir = PathBuf::from("/m");
        let mut state = images_state(Path::new("/home/WhatsApp"));
        state.request_listings();
        state.apply_listing(result(
            1,
            SubView::Received,
            vec![entry(&dir, "a", 1, 0), entry(&dir, "b", 1, 0)],
        ));
        state.select_all();

        assert_eq!(state.begin_delete().unwrap().len(), 2);
        assert!(matches!(
            state.begin_delete(),
            Err(SweepError::DeleteInProgress)
        ));

        state.apply_delete_message(DeleteMessage::Completed(DeleteReport::default()));
        assert!(!state.in_progress());
        assert!(matches!(state.begin_delete(), Err(SweepError::NothingSelected)));
    }

    #[test]
    fn test_relisting_prunes_selection() {
        let dir = PathBuf::from("/m");
        let mut state = images_state(Path::new("/home/WhatsApp"));
        state.request_listings();
        state.apply_listing(result(
            1,
            SubView::Received,
            vec![entry(&dir, "a", 1, 0), entry(&dir, "b", 1, 0)],
        ));
        state.select_all();

        state.request_listings();
        state.apply_listing(result(2, SubView::Received, vec![entry(&dir, "b", 1, 0)]));
        assert_eq!(state.selection().len(), 1);
        assert!(state.selection().contains_path(&dir.join("b")));
    }

    #[test]
    fn test_reset_filters_clears_range_and_selection() {
        let dir = PathBuf::from("/m");
        let mut state = images_state(Path::new("/home/WhatsApp"));
        state.request_listings();
        state.apply_listing(result(1, SubView::Received, vec![entry(&dir, "a", 1, 0)]));
        state.select_all();
        state.set_date_range(Some(DateRange::new(0, 10).unwrap()));

        let requests = state.reset_filters();
        assert!(state.date_range().is_none());
        assert!(requests.iter().all(|r| r.range.is_none()));
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_deleted_entry_leaves_list_and_selection() {
        let dir = PathBuf::from("/m");
        let mut state = images_state(Path::new("/home/WhatsApp"));
        state.request_listings();
        state.apply_listing(result(
            1,
            SubView::Received,
            vec![entry(&dir, "a", 4, 0), entry(&dir, "b", 6, 0)],
        ));
        state.select_all();
        assert_eq!(state.total_size(), 10);

        let batch = state.begin_delete().unwrap();
        assert_eq!(batch.len(), 2);
        assert!(state.in_progress());

        state.apply_delete_message(DeleteMessage::Deleted {
            path: dir.join("a"),
            size: 4,
        });
        assert_eq!(state.visible().len(), 1);
        assert!(!state.selection().contains_path(&dir.join("a")));
        assert!(state.selection().contains_path(&dir.join("b")));

        let reload = state
            .apply_delete_message(DeleteMessage::Completed(DeleteReport {
                deleted: vec![dir.join("a")],
                bytes_freed: 4,
                failures: vec![(dir.join("b"), "busy".to_string())],
                permission_denied: false,
            }))
            .unwrap();
        assert!(!state.in_progress());
        assert!(state.selection().is_empty());
        assert_eq!(reload[0].generation, state.generation());
        assert!(state.take_reload_request());
        assert!(!state.take_reload_request());
        assert_eq!(state.last_report().unwrap().failures.len(), 1);
    }

    #[test]
    fn test_reload_after_delete_never_brings_file_back() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("WhatsApp");
        let images = home.join("Media").join("WhatsApp Images");
        fs::create_dir_all(images.join("Sent")).unwrap();
        fs::write(images.join("keep.jpg"), "k").unwrap();
        fs::write(images.join("drop.jpg"), "dd").unwrap();
        fs::write(images.join("Sent/sent.jpg"), "s").unwrap();

        let fs_provider: Arc<dyn crate::fs::Filesystem> = Arc::new(StdFilesystem);
        let lister = Lister::new(Arc::clone(&fs_provider), ListingConfig::default());
        let mut state = images_state(&home);

        for result in lister.spawn(state.request_listings()) {
            state.apply_listing(result);
        }
        assert_eq!(state.visible().len(), 2);
        assert_eq!(state.list(SubView::Sent).len(), 1);
        assert!(state.list(SubView::Private).is_empty());

        assert!(state.toggle(&images.join("drop.jpg")));
        let batch = state.begin_delete().unwrap();

        let deleter = Deleter::new(Arc::clone(&fs_provider), DeleteConfig::default());
        let (rx, handle) = deleter.delete(batch);
        let mut reload = None;
        for message in rx {
            if let Some(requests) = state.apply_delete_message(message) {
                reload = Some(requests);
            }
        }
        handle.join().unwrap();

        for result in lister.spawn(reload.unwrap()) {
            state.apply_listing(result);
        }
        let names: Vec<&str> = state.visible().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["keep.jpg"]);
        assert_eq!(state.list(SubView::Sent).len(), 1);
    }
}
