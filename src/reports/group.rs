//! Owner grouping for document reports.
//!
//! The document report ignores the on-screen sort. Rows are re-ordered by
//! owner, status weight and entry time, then a fold carrying the last owner
//! seen inserts a header row at every owner break.

use crate::model::{status_weight, Record};
use std::cmp::Ordering;

/// One emitted row of a grouped report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRow<'a> {
    /// Full-width owner header preceding the owner's first record
    GroupHeader(&'a str),
    Record(&'a Record),
}

impl<'a> ReportRow<'a> {
    #[must_use]
    pub const fn as_record(&self) -> Option<&'a Record> {
        match self {
            Self::Record(r) => Some(r),
            Self::GroupHeader(_) => None,
        }
    }
}

/// Report ordering: owner label ascending, then status weight, then entry
/// timestamp ascending with missing or unreadable timestamps first.
#[must_use]
pub fn report_order(a: &Record, b: &Record) -> Ordering {
    a.owner_label()
        .cmp(b.owner_label())
        .then_with(|| status_weight(&a.status_label()).cmp(&status_weight(&b.status_label())))
        .then_with(|| a.entry_timestamp().cmp(&b.entry_timestamp()))
}

/// Sort a copy of the view into report order.
#[must_use]
pub fn order_for_report<'a>(view: &[&'a Record]) -> Vec<&'a Record> {
    let mut ordered = view.to_vec();
    ordered.sort_by(|a, b| report_order(a, b));
    ordered
}

/// Produce the grouped row sequence.
///
/// Headers are only emitted when the rows span more than one owner; a
/// single-owner report is a plain table.
#[must_use]
pub fn group_for_report<'a>(view: &[&'a Record]) -> Vec<ReportRow<'a>> {
    let ordered = order_for_report(view);
    let multiple_owners = ordered
        .first()
        .is_some_and(|first| ordered.iter().any(|r| r.owner_label() != first.owner_label()));

    if !multiple_owners {
        return ordered.into_iter().map(ReportRow::Record).collect();
    }

    let (rows, _) = ordered.into_iter().fold(
        (Vec::with_capacity(view.len() * 2), None::<&str>),
        |(mut rows, last_owner), record| {
            let owner = record.owner_label();
            if last_owner != Some(owner) {
                rows.push(ReportRow::GroupHeader(owner));
            }
            rows.push(ReportRow::Record(record));
            (rows, Some(owner))
        },
    );
    rows
}

/// Count of header rows in a grouped sequence.
#[must_use]
pub fn header_count(rows: &[ReportRow<'_>]) -> usize {
    rows.iter()
        .filter(|r| matches!(r, ReportRow::GroupHeader(_)))
        .count()
}
