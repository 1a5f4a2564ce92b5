//! Multi-criteria record filtering.
//!
//! A [`FilterState`] holds four membership sets and three date ranges. A
//! record passes when it satisfies every constrained dimension (AND across
//! dimensions) and, within a membership set, matches any listed value (OR
//! within a set). Empty sets and unbounded ranges never reject anything.

use crate::model::{date_prefix, normalize_status, Record, UNKNOWN_STATUS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive calendar-date range.
///
/// Stored timestamps are compared by their `YYYY-MM-DD` prefix, so the upper
/// bound includes the whole of its day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// True when neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Check a stored timestamp against the range.
    ///
    /// A missing timestamp only passes an unbounded range.
    #[must_use]
    pub fn contains(&self, raw: Option<&str>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(raw) = raw else {
            return false;
        };
        let day = date_prefix(raw);

        if let Some(from) = self.from
            && day < from.format("%Y-%m-%d").to_string().as_str()
        {
            return false;
        }
        if let Some(to) = self.to
            && day > to.format("%Y-%m-%d").to_string().as_str()
        {
            return false;
        }
        true
    }
}

/// Dimensions addressable by the multi-select widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Owner,
    Department,
    Requester,
    Status,
}

impl FilterDimension {
    pub const ALL: [Self; 4] = [Self::Owner, Self::Department, Self::Requester, Self::Status];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Department => "Department",
            Self::Requester => "Requester",
            Self::Status => "Status",
        }
    }
}

/// Date dimensions with a range constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateDimension {
    Entry,
    Due,
    Completed,
}

impl DateDimension {
    pub const ALL: [Self; 3] = [Self::Entry, Self::Due, Self::Completed];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Entry => "Entry",
            Self::Due => "Due",
            Self::Completed => "Completed",
        }
    }
}

/// The full set of active filter constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub owners: BTreeSet<String>,
    pub departments: BTreeSet<String>,
    pub requesters: BTreeSet<String>,
    /// Canonical status labels
    pub statuses: BTreeSet<String>,
    pub entry: DateRange,
    pub due: DateRange,
    pub completed: DateRange,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no dimension carries a constraint.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
            && self.departments.is_empty()
            && self.requesters.is_empty()
            && self.statuses.is_empty()
            && self.entry.is_unbounded()
            && self.due.is_unbounded()
            && self.completed.is_unbounded()
    }

    /// Drop every constraint.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Membership set for a dimension.
    #[must_use]
    pub const fn set(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        match dimension {
            FilterDimension::Owner => &self.owners,
            FilterDimension::Department => &self.departments,
            FilterDimension::Requester => &self.requesters,
            FilterDimension::Status => &self.statuses,
        }
    }

    fn set_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::Owner => &mut self.owners,
            FilterDimension::Department => &mut self.departments,
            FilterDimension::Requester => &mut self.requesters,
            FilterDimension::Status => &mut self.statuses,
        }
    }

    /// Add or remove a value from a membership set. Status values are
    /// normalized first. Returns whether the value is now selected.
    pub fn toggle(&mut self, dimension: FilterDimension, value: &str) -> bool {
        let value = match dimension {
            FilterDimension::Status => normalize_status(Some(value)),
            _ => value.to_string(),
        };
        let set = self.set_mut(dimension);
        if set.remove(&value) {
            false
        } else {
            set.insert(value);
            true
        }
    }

    pub fn toggle_owner(&mut self, owner: &str) -> bool {
        self.toggle(FilterDimension::Owner, owner)
    }

    pub fn toggle_department(&mut self, department: &str) -> bool {
        self.toggle(FilterDimension::Department, department)
    }

    pub fn toggle_requester(&mut self, requester: &str) -> bool {
        self.toggle(FilterDimension::Requester, requester)
    }

    pub fn toggle_status(&mut self, status: &str) -> bool {
        self.toggle(FilterDimension::Status, status)
    }

    #[must_use]
    pub const fn range(&self, dimension: DateDimension) -> &DateRange {
        match dimension {
            DateDimension::Entry => &self.entry,
            DateDimension::Due => &self.due,
            DateDimension::Completed => &self.completed,
        }
    }

    pub fn range_mut(&mut self, dimension: DateDimension) -> &mut DateRange {
        match dimension {
            DateDimension::Entry => &mut self.entry,
            DateDimension::Due => &mut self.due,
            DateDimension::Completed => &mut self.completed,
        }
    }

    /// Evaluate every constraint against a record.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        member(&self.owners, record.owner.as_deref())
            && member(&self.departments, record.department.as_deref())
            && member(&self.requesters, record.requester.as_deref())
            && (self.statuses.is_empty() || self.statuses.contains(&record.status_label()))
            && self.entry.contains(record.entry_date.as_deref())
            && self.due.contains(record.due_date.as_deref())
            && self.completed.contains(record.completed_at.as_deref())
    }

    /// Number of constrained dimensions, shown as a badge in the dashboard.
    #[must_use]
    pub fn active_count(&self) -> usize {
        let sets = FilterDimension::ALL
            .iter()
            .filter(|d| !self.set(**d).is_empty())
            .count();
        let ranges = DateDimension::ALL
            .iter()
            .filter(|d| !self.range(**d).is_unbounded())
            .count();
        sets + ranges
    }
}

fn member(set: &BTreeSet<String>, value: Option<&str>) -> bool {
    set.is_empty() || value.is_some_and(|v| set.contains(v))
}

/// Apply a filter, preserving the input's relative order.
#[must_use]
pub fn filter_records<'a>(records: &'a [Record], filter: &FilterState) -> Vec<&'a Record> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Distinct values available to each multi-select widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub owners: Vec<String>,
    pub departments: Vec<String>,
    pub requesters: Vec<String>,
    pub statuses: Vec<String>,
}

impl FilterOptions {
    /// Collect sorted unique non-empty values. The unknown-status
    /// placeholder is not offered as an option.
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let mut owners = BTreeSet::new();
        let mut departments = BTreeSet::new();
        let mut requesters = BTreeSet::new();
        let mut statuses = BTreeSet::new();

        for record in records {
            if let Some(v) = &record.owner {
                owners.insert(v.clone());
            }
            if let Some(v) = &record.department {
                departments.insert(v.clone());
            }
            if let Some(v) = &record.requester {
                requesters.insert(v.clone());
            }
            let status = record.status_label();
            if status != UNKNOWN_STATUS {
                statuses.insert(status);
            }
        }

        Self {
            owners: owners.into_iter().collect(),
            departments: departments.into_iter().collect(),
            requesters: requesters.into_iter().collect(),
            statuses: statuses.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn values(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            FilterDimension::Owner => &self.owners,
            FilterDimension::Department => &self.departments,
            FilterDimension::Requester => &self.requesters,
            FilterDimension::Status => &self.statuses,
        }
    }
}
