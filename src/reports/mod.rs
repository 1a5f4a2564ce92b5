//! Report generation for filtered record views.
//!
//! This module provides the output formats for the dashboard's exports:
//! - PDF: Paginated document grouped by owner, with branded header and footer
//! - Xlsx: Single-sheet workbook in filtered order
//! - CSV: Flat rows in the same column order as the workbook
//! - JSON: Structured data for programmatic integration
//! - Table: Aligned tabular terminal output
//!
//! Every generator consumes the view read-only. The document report applies
//! its own grouping order ([`group`]); the other formats keep the order they
//! are given.

mod csv;
pub mod group;
mod json;
pub mod pdf;
mod table;
mod types;
mod xlsx;

pub use csv::CsvReporter;
pub use group::{group_for_report, order_for_report, ReportRow};
pub use json::JsonReporter;
pub use pdf::PdfReporter;
pub use table::TableReporter;
pub use types::{FooterColumn, ReportContext, ReportFormat};
pub use xlsx::XlsxReporter;

use crate::model::{format_display_date, Record, RecordField};
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the given rows into the output document.
    fn generate(&self, rows: &[&Record], ctx: &ReportContext) -> Result<Vec<u8>, ReportError>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Column order shared by the workbook and CSV output.
pub const SHEET_COLUMNS: [RecordField; 10] = [
    RecordField::EntryDate,
    RecordField::DueDate,
    RecordField::CompletedAt,
    RecordField::Owner,
    RecordField::Requester,
    RecordField::Project,
    RecordField::Department,
    RecordField::CurrentTask,
    RecordField::Status,
    RecordField::Notes,
];

/// Display text for a record column: canonical status label, `dd/mm/yyyy`
/// dates, and `-` for anything absent.
#[must_use]
pub fn cell_value(record: &Record, field: RecordField) -> String {
    if field == RecordField::Status {
        record.status_label()
    } else if field.is_date() {
        format_display_date(record.raw(field))
    } else {
        record.text_or_missing(field).to_string()
    }
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Pdf => Box::new(PdfReporter::new()),
        ReportFormat::Xlsx => Box::new(XlsxReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Table => {
            if use_color {
                Box::new(TableReporter::new())
            } else {
                Box::new(TableReporter::new().no_color())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_formats() {
        for format in [
            ReportFormat::Pdf,
            ReportFormat::Xlsx,
            ReportFormat::Csv,
            ReportFormat::Json,
            ReportFormat::Table,
        ] {
            assert_eq!(create_reporter(format).format(), format);
        }
    }

    #[test]
    fn test_cell_value() {
        let mut r = Record::new(1);
        r.due_date = Some("2024-12-31T18:00:00Z".into());
        r.completed_at = Some("whenever".into());
        r.status = Some("active".into());
        assert_eq!(cell_value(&r, RecordField::DueDate), "31/12/2024");
        assert_eq!(cell_value(&r, RecordField::CompletedAt), "whenever");
        assert_eq!(cell_value(&r, RecordField::EntryDate), "-");
        assert_eq!(cell_value(&r, RecordField::Status), "IN PROGRESS");
        assert_eq!(cell_value(&r, RecordField::Owner), "-");
    }
}
