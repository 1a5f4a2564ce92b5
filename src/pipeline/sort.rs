//! Single-key tri-state sorting.

use crate::model::{Record, RecordField};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Columns the view can be sorted by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Entry,
    Due,
    Requester,
    Project,
    Department,
    Owner,
    Task,
    Status,
    Completed,
}

impl SortKey {
    /// Column order in the dashboard; index `n` is bound to key `n + 1`.
    pub const ALL: [Self; 9] = [
        Self::Entry,
        Self::Due,
        Self::Requester,
        Self::Project,
        Self::Department,
        Self::Owner,
        Self::Task,
        Self::Status,
        Self::Completed,
    ];

    #[must_use]
    pub const fn field(self) -> RecordField {
        match self {
            Self::Entry => RecordField::EntryDate,
            Self::Due => RecordField::DueDate,
            Self::Requester => RecordField::Requester,
            Self::Project => RecordField::Project,
            Self::Department => RecordField::Department,
            Self::Owner => RecordField::Owner,
            Self::Task => RecordField::CurrentTask,
            Self::Status => RecordField::Status,
            Self::Completed => RecordField::CompletedAt,
        }
    }

    /// Key bound to a 1-based column number.
    #[must_use]
    pub fn from_index(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Comparison value: the canonical status label for status, the stored
    /// text for everything else, empty when absent.
    fn value(self, record: &Record) -> std::borrow::Cow<'_, str> {
        match self {
            Self::Status => record.status_label().into(),
            other => record.raw(other.field()).unwrap_or_default().into(),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field().heading())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header indicator.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

/// At most one active (key, direction) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState(Option<(SortKey, SortDirection)>);

impl SortState {
    /// No active sort.
    pub const NONE: Self = Self(None);

    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self(Some((key, direction)))
    }

    #[must_use]
    pub const fn active(&self) -> Option<(SortKey, SortDirection)> {
        self.0
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Direction for a key if it is the active one.
    #[must_use]
    pub fn direction_of(&self, key: SortKey) -> Option<SortDirection> {
        self.0.filter(|(k, _)| *k == key).map(|(_, d)| d)
    }

    /// Apply a header selection.
    ///
    /// | current          | requested | next           |
    /// |------------------|-----------|----------------|
    /// | none             | k         | (k, asc)       |
    /// | (k, asc)         | k         | (k, desc)      |
    /// | (k, desc)        | k         | none           |
    /// | (j, any), j ≠ k  | k         | (k, asc)       |
    #[must_use]
    pub fn activate(self, key: SortKey) -> Self {
        use SortDirection::{Ascending, Descending};
        match self.0 {
            Some((current, Ascending)) if current == key => Self::new(key, Descending),
            Some((current, Descending)) if current == key => Self::NONE,
            _ => Self::new(key, Ascending),
        }
    }
}

impl fmt::Display for SortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("unsorted"),
            Some((key, dir)) => write!(f, "{key} {}", dir.arrow()),
        }
    }
}

/// Sort a view in place. Stable, so ties keep their filtered order; the
/// `none` state leaves the input untouched.
pub fn sort_view(view: &mut [&Record], state: SortState) {
    let Some((key, direction)) = state.active() else {
        return;
    };
    view.sort_by(|a, b| {
        let ord = compare_by(key, a, b);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

fn compare_by(key: SortKey, a: &Record, b: &Record) -> Ordering {
    key.value(a).cmp(&key.value(b))
}
