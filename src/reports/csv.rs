//! CSV report generator.
//!
//! Flat rows in the workbook's column order, suitable for spreadsheet
//! import and scripting.

use super::{cell_value, ReportContext, ReportError, ReportFormat, ReportGenerator, SHEET_COLUMNS};
use crate::model::Record;
use std::fmt::Write;

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate(&self, rows: &[&Record], _ctx: &ReportContext) -> Result<Vec<u8>, ReportError> {
        let mut content = String::new();

        let header: Vec<&str> = std::iter::once("ID")
            .chain(SHEET_COLUMNS.iter().map(|f| f.heading()))
            .collect();
        writeln!(content, "{}", header.join(","))?;

        for record in rows {
            write!(content, "{}", record.id)?;
            for field in SHEET_COLUMNS {
                write!(content, ",\"{}\"", escape_csv(&cell_value(record, field)))?;
            }
            content.push('\n');
        }

        Ok(content.into_bytes())
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace(['\n', '\r'], " ")
}
