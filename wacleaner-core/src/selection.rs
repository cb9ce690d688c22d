use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::catalog::SubView;
use crate::entry::FileEntry;

/// Files the user picked in the active sub-view, keyed by path
#[derive(Debug, Clone)]
pub struct Selection {
    view: SubView,
    paths: HashSet<PathBuf>,
    all_selected: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    pub fn new() -> Self {
        Self {
            view: SubView::Received,
            paths: HashSet::new(),
            all_selected: false,
        }
    }

    pub fn view(&self) -> SubView {
        self.view
    }

    pub fn is_all_selected(&self) -> bool {
        self.all_selected
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, entry: &FileEntry) -> bool {
        self.paths.contains(&entry.path)
    }

    pub fn contains_path(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Add the entry, or remove it if already selected
    pub fn toggle(&mut self, entry: &FileEntry) {
        if !self.paths.remove(&entry.path) {
            self.paths.insert(entry.path.clone());
        }
        if self.paths.is_empty() {
            self.all_selected = false;
        }
    }

    /// Select every entry of the active sub-view
    pub fn select_all(&mut self, visible: &[FileEntry]) {
        self.paths.extend(visible.iter().map(|e| e.path.clone()));
        self.all_selected = true;
    }

    /// Flip the select-all flag: select everything visible, or clear
    pub fn toggle_select_all(&mut self, visible: &[FileEntry]) {
        if self.all_selected {
            self.clear();
        } else {
            self.select_all(visible);
        }
    }

    pub fn clear(&mut self) {
        self.paths.clear();
        self.all_selected = false;
    }

    /// Change the active sub-view. Selection never spans sub-views, so it is cleared.
    pub fn switch_view(&mut self, view: SubView) {
        if self.view != view {
            self.view = view;
            self.clear();
        }
    }

    /// Drop selected paths that are not in `visible`
    pub fn retain_present(&mut self, visible: &[FileEntry]) {
        let present: HashSet<&PathBuf> = visible.iter().map(|e| &e.path).collect();
        self.paths.retain(|p| present.contains(p));
        if self.paths.is_empty() {
            self.all_selected = false;
        }
    }

    /// Remove paths, e.g. after they were deleted
    pub fn evict<'a>(&mut self, paths: impl IntoIterator<Item = &'a Path>) {
        for path in paths {
            self.paths.remove(path);
        }
        if self.paths.is_empty() {
            self.all_selected = false;
        }
    }

    /// Selected entries of `visible`, in its order
    pub fn selected_entries(&self, visible: &[FileEntry]) -> Vec<FileEntry> {
        visible
            .iter()
            .filter(|e| self.contains(e))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<FileEntry> {
        names
            .iter()
            .map(|n| FileEntry::new(PathBuf::from("/m").join(n), 1, 0))
            .collect()
    }

    #[test]
    fn test_toggle() {
        let list = entries(&["a", "b"]);
        let mut sel = Selection::new();
        sel.toggle(&list[0]);
        assert!(sel.contains(&list[0]));
        assert!(!sel.contains(&list[1]));
        sel.toggle(&list[0]);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_select_all_then_clear() {
        let list = entries(&["a", "b", "c"]);
        let mut sel = Selection::new();
        sel.select_all(&list);
        assert_eq!(sel.len(), 3);
        assert!(sel.is_all_selected());
        sel.clear();
        assert!(sel.is_empty());
        assert!(!sel.is_all_selected());
    }

    #[test]
    fn test_toggle_select_all_flips() {
        let list = entries(&["a", "b"]);
        let mut sel = Selection::new();
        sel.toggle_select_all(&list);
        assert_eq!(sel.len(), 2);
        sel.toggle_select_all(&list);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_switch_view_clears() {
        let list = entries(&["a"]);
        let mut sel = Selection::new();
        sel.select_all(&list);

        sel.switch_view(SubView::Received);
        assert_eq!(sel.len(), 1);

        sel.switch_view(SubView::Sent);
        assert_eq!(sel.view(), SubView::Sent);
        assert!(sel.is_empty());
        assert!(!sel.is_all_selected());
    }

    #[test]
    fn test_retain_present_and_evict() {
        let list = entries(&["a", "b", "c"]);
        let mut sel = Selection::new();
        sel.select_all(&list);

        sel.retain_present(&list[1..]);
        assert!(!sel.contains(&list[0]));
        assert_eq!(sel.len(), 2);

        sel.evict([list[1].path.as_path()]);
        assert_eq!(sel.selected_entries(&list), vec![list[2].clone()]);

        sel.evict([list[2].path.as_path()]);
        assert!(!sel.is_all_selected());
    }
}
