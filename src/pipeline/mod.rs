//! The filter → sort → paginate pipeline.
//!
//! Views are never cached: every state change re-derives the view from the
//! owned record set with [`derive_view`], so deletions and filter edits are
//! reflected immediately without a refetch.

mod filter;
mod output;
mod paginate;
mod sort;

pub use filter::{
    filter_records, DateDimension, DateRange, FilterDimension, FilterOptions, FilterState,
};
pub use output::{should_use_color, write_bytes_atomic, write_output, OutputTarget};
pub use paginate::{Page, Paginator, PAGE_SIZE};
pub use sort::{sort_view, SortDirection, SortKey, SortState};

use crate::model::{status_weight, Record};
use indexmap::IndexMap;

/// Filter then sort, returning references into `records`.
#[must_use]
pub fn derive_view<'a>(
    records: &'a [Record],
    filter: &FilterState,
    sort: SortState,
) -> Vec<&'a Record> {
    let mut view = filter_records(records, filter);
    sort_view(&mut view, sort);
    tracing::debug!(
        total = records.len(),
        visible = view.len(),
        sort = %sort,
        "derived view"
    );
    view
}

/// Rows per canonical status in report weight order (DONE, IN PROGRESS,
/// PENDING), then any other label alphabetically.
#[must_use]
pub fn status_counts(view: &[&Record]) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for record in view {
        *counts.entry(record.status_label()).or_default() += 1;
    }
    counts.sort_by(|a, _, b, _| {
        status_weight(a)
            .cmp(&status_weight(b))
            .then_with(|| a.cmp(b))
    });
    counts
}

/// Exit codes for scripted use
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// An error occurred
    pub const ERROR: i32 = 1;
    /// Records could not be fetched; output reflects an empty set
    pub const DEGRADED: i32 = 2;
    /// The user declined a confirmation prompt
    pub const CANCELLED: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::ERROR, 1);
        assert_eq!(exit_codes::DEGRADED, 2);
        assert_eq!(exit_codes::CANCELLED, 3);
    }

    #[test]
    fn test_status_counts_ordered_by_weight() {
        let mut records: Vec<Record> = (1..=5).map(Record::new).collect();
        records[0].status = Some("completed".into());
        records[1].status = Some("waiting".into());
        records[2].status = Some("completed".into());
        records[3].status = Some("active".into());
        let view: Vec<&Record> = records.iter().collect();

        let counts = status_counts(&view);
        let order: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(
            order,
            vec![("DONE", 2), ("IN PROGRESS", 1), ("PENDING", 1), ("—", 1)]
        );
    }

    #[test]
    fn test_derive_view_filters_then_sorts() {
        let mut records: Vec<Record> = (1..=4).map(Record::new).collect();
        records[0].owner = Some("b".into());
        records[1].owner = Some("a".into());
        records[2].owner = Some("c".into());
        records[3].owner = Some("a".into());

        let mut filter = FilterState::new();
        filter.toggle_owner("a");
        filter.toggle_owner("b");
        let sort = SortState::NONE.activate(SortKey::Owner);

        let ids: Vec<i64> = derive_view(&records, &filter, sort)
            .iter()
            .map(|r| r.id.0)
            .collect();
        assert_eq!(ids, vec![2, 4, 1]);
    }
}
