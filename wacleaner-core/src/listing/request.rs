use std::path::PathBuf;

use crate::catalog::SubView;
use crate::entry::FileEntry;
use crate::error::SweepError;
use crate::sort::{DateRange, SortCriteria};

/// One directory listing to run in the background
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    /// Generation of the session that issued the request
    pub generation: u64,
    pub view: SubView,
    pub path: PathBuf,
    pub criteria: SortCriteria,
    pub range: Option<DateRange>,
}

/// Finished listing for one sub-view
#[derive(Debug)]
pub struct ListingResult {
    pub generation: u64,
    pub view: SubView,
    /// Complete replacement for the sub-view's previous entries
    pub entries: Vec<FileEntry>,
    /// Set when the directory could not be read (entries is then empty)
    pub error: Option<SweepError>,
}
