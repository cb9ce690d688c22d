use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::entry::FileEntry;
use crate::error::{Result, SweepError};

/// Field a listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Size,
    Name,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Date => "Date",
            SortKey::Size => "Size",
            SortKey::Name => "Name",
        }
    }
}

/// Ordering applied to a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortCriteria {
    pub key: SortKey,
    pub descending: bool,
}

impl SortCriteria {
    pub fn new(key: SortKey, descending: bool) -> Self {
        Self { key, descending }
    }

    /// Total order: the key (reversed when descending), then the path ascending
    pub fn compare(&self, a: &FileEntry, b: &FileEntry) -> Ordering {
        let by_key = match self.key {
            SortKey::Date => a.modified_ms.cmp(&b.modified_ms),
            SortKey::Size => a.size.cmp(&b.size),
            SortKey::Name => a.name.cmp(&b.name),
        };
        let by_key = if self.descending {
            by_key.reverse()
        } else {
            by_key
        };
        by_key.then_with(|| a.path.cmp(&b.path))
    }
}

impl Default for SortCriteria {
    /// Newest first
    fn default() -> Self {
        Self::new(SortKey::Date, true)
    }
}

/// Inclusive range of modification times, in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start_ms: i64,
    end_ms: i64,
}

impl DateRange {
    pub fn new(start_ms: i64, end_ms: i64) -> Result<Self> {
        if start_ms > end_ms {
            return Err(SweepError::InvalidDateRange { start_ms, end_ms });
        }
        Ok(Self { start_ms, end_ms })
    }

    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> i64 {
        self.end_ms
    }

    pub fn contains(&self, modified_ms: i64) -> bool {
        (self.start_ms..=self.end_ms).contains(&modified_ms)
    }
}

/// Keep entries modified within `range`; `None` keeps everything
pub fn filter_by_range(entries: Vec<FileEntry>, range: Option<&DateRange>) -> Vec<FileEntry> {
    match range {
        Some(range) => entries
            .into_iter()
            .filter(|e| range.contains(e.modified_ms))
            .collect(),
        None => entries,
    }
}

pub fn sort_entries(entries: &mut [FileEntry], criteria: SortCriteria) {
    entries.sort_by(|a, b| criteria.compare(a, b));
}

/// Filter by `range`, then sort by `criteria`
pub fn apply(
    entries: Vec<FileEntry>,
    criteria: SortCriteria,
    range: Option<&DateRange>,
) -> Vec<FileEntry> {
    let mut entries = filter_by_range(entries, range);
    sort_entries(&mut entries, criteria);
    entries
}
