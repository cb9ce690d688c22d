pub mod catalog;
pub mod delete;
pub mod entry;
pub mod error;
pub mod fs;
pub mod listing;
pub mod selection;
pub mod session;
pub mod size;
pub mod sort;

pub use catalog::{
    Category, CategoryIcon, SubView, app_folder_name, find_category, resolve_categories,
};
pub use delete::{DeleteConfig, DeleteMessage, DeleteProgress, DeleteReport, Deleter};
pub use entry::{FileEntry, MediaKind};
pub use error::{Result, SweepError};
pub use fs::{FileStat, Filesystem, RawEntry, StdFilesystem};
pub use listing::{Lister, ListingConfig, ListingRequest, ListingResult, list_files};
pub use selection::Selection;
pub use session::DetailsState;
pub use size::{format_count, format_size};
pub use sort::{DateRange, SortCriteria, SortKey};
