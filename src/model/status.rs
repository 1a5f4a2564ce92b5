//! Status normalization.
//!
//! Every place that filters, sorts, displays, colors or groups by status goes
//! through [`normalize_status`] so the canonical label is derived exactly once
//! per rule.

use serde::{Deserialize, Serialize};

/// Canonical label for records in progress (`active`).
pub const IN_PROGRESS: &str = "IN PROGRESS";
/// Canonical label for records waiting on someone (`waiting`).
pub const PENDING: &str = "PENDING";
/// Canonical label for closed records (`completed`).
pub const DONE: &str = "DONE";
/// Placeholder shown when a record carries no status at all.
pub const UNKNOWN_STATUS: &str = "—";

/// Weight used for unrecognized labels when ordering by status.
pub const UNRECOGNIZED_WEIGHT: u8 = 99;

/// Map a raw status code to its canonical uppercase label.
///
/// Recognized codes are matched case-insensitively; anything else passes
/// through upper-cased, and an empty or absent value yields
/// [`UNKNOWN_STATUS`]. Normalizing a canonical label returns it unchanged.
#[must_use]
pub fn normalize_status(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return UNKNOWN_STATUS.to_string();
    };

    match raw.to_lowercase().as_str() {
        "active" => IN_PROGRESS.to_string(),
        "waiting" => PENDING.to_string(),
        "completed" => DONE.to_string(),
        _ => raw.to_uppercase(),
    }
}

/// Semantic class of a canonical status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    InProgress,
    Pending,
    Done,
    /// Unrecognized passthrough or the unknown placeholder
    Other,
}

impl StatusKind {
    /// Classify an already-normalized label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            IN_PROGRESS => Self::InProgress,
            PENDING => Self::Pending,
            DONE => Self::Done,
            _ => Self::Other,
        }
    }

    /// Ordering weight used by grouped reports: DONE first, then IN PROGRESS,
    /// then PENDING, everything else last.
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::Done => 1,
            Self::InProgress => 2,
            Self::Pending => 3,
            Self::Other => UNRECOGNIZED_WEIGHT,
        }
    }

    /// RGB text color used by the document emitters.
    #[must_use]
    pub const fn rgb(self) -> Option<(u8, u8, u8)> {
        match self {
            Self::Done => Some((21, 128, 61)),
            Self::Pending => Some((161, 98, 7)),
            Self::InProgress => Some((29, 78, 216)),
            Self::Other => None,
        }
    }
}

/// Weight of a canonical label, see [`StatusKind::weight`].
#[must_use]
pub fn status_weight(label: &str) -> u8 {
    StatusKind::from_label(label).weight()
}
