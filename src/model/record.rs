//! Work item records as fetched from the upstream store.

use super::date::{parse_instant, MISSING_VALUE};
use super::status::{normalize_status, StatusKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Label used in reports for records with no owner.
pub const UNASSIGNED_OWNER: &str = "Unassigned";

/// Unique, immutable record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A tracked work item.
///
/// Every field except `id` is optional upstream; empty strings are read as
/// absent. Legacy column names from the upstream table are accepted as
/// aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default, alias = "data_entrada", deserialize_with = "non_empty")]
    pub entry_date: Option<String>,
    #[serde(default, alias = "previsao_prazo", deserialize_with = "non_empty")]
    pub due_date: Option<String>,
    #[serde(default, alias = "data_conclusao", deserialize_with = "non_empty")]
    pub completed_at: Option<String>,
    #[serde(default, alias = "solicitante", deserialize_with = "non_empty")]
    pub requester: Option<String>,
    #[serde(default, alias = "processo_projeto", deserialize_with = "non_empty")]
    pub project: Option<String>,
    #[serde(default, alias = "departamento", deserialize_with = "non_empty")]
    pub department: Option<String>,
    #[serde(default, alias = "lider_card", deserialize_with = "non_empty")]
    pub owner: Option<String>,
    #[serde(default, alias = "tarefa_atual", deserialize_with = "non_empty")]
    pub current_task: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub status: Option<String>,
    #[serde(default, alias = "resumo_observacoes", deserialize_with = "non_empty")]
    pub notes: Option<String>,
}

/// Addressable record columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    EntryDate,
    DueDate,
    CompletedAt,
    Requester,
    Project,
    Department,
    Owner,
    CurrentTask,
    Status,
    Notes,
}

impl RecordField {
    /// Column heading used by every emitter.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::EntryDate => "Entry",
            Self::DueDate => "Due",
            Self::CompletedAt => "Completed",
            Self::Requester => "Requester",
            Self::Project => "Project",
            Self::Department => "Department",
            Self::Owner => "Owner",
            Self::CurrentTask => "Current Task",
            Self::Status => "Status",
            Self::Notes => "Notes",
        }
    }

    /// Whether the column holds a timestamp.
    #[must_use]
    pub const fn is_date(self) -> bool {
        matches!(self, Self::EntryDate | Self::DueDate | Self::CompletedAt)
    }
}

impl Record {
    /// Create a record with only an identifier set.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self {
            id: RecordId(id),
            entry_date: None,
            due_date: None,
            completed_at: None,
            requester: None,
            project: None,
            department: None,
            owner: None,
            current_task: None,
            status: None,
            notes: None,
        }
    }

    /// Raw stored value of a column. Status returns the raw code.
    #[must_use]
    pub fn raw(&self, field: RecordField) -> Option<&str> {
        let value = match field {
            RecordField::EntryDate => &self.entry_date,
            RecordField::DueDate => &self.due_date,
            RecordField::CompletedAt => &self.completed_at,
            RecordField::Requester => &self.requester,
            RecordField::Project => &self.project,
            RecordField::Department => &self.department,
            RecordField::Owner => &self.owner,
            RecordField::CurrentTask => &self.current_task,
            RecordField::Status => &self.status,
            RecordField::Notes => &self.notes,
        };
        value.as_deref()
    }

    /// Canonical status label.
    #[must_use]
    pub fn status_label(&self) -> String {
        normalize_status(self.status.as_deref())
    }

    /// Semantic status class.
    #[must_use]
    pub fn status_kind(&self) -> StatusKind {
        StatusKind::from_label(&self.status_label())
    }

    /// Owner label for grouping, with a fixed fallback.
    #[must_use]
    pub fn owner_label(&self) -> &str {
        self.owner.as_deref().unwrap_or(UNASSIGNED_OWNER)
    }

    /// Entry time as an instant, if present and readable.
    #[must_use]
    pub fn entry_timestamp(&self) -> Option<DateTime<Utc>> {
        self.entry_date.as_deref().and_then(parse_instant)
    }

    /// Plain-text value for a text column, `-` when absent.
    #[must_use]
    pub fn text_or_missing(&self, field: RecordField) -> &str {
        self.raw(field).unwrap_or(MISSING_VALUE)
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
