//! Default values for trackboard configuration.

use crate::reports::FooterColumn;

/// Upstream table name.
pub const DEFAULT_TABLE: &str = "projects";
/// Column the store orders by, newest first.
pub const DEFAULT_ORDER_COLUMN: &str = "data_entrada";
pub const DEFAULT_ID_COLUMN: &str = "id";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_PDF_FILE_NAME: &str = "tracking_report.pdf";
pub const DEFAULT_XLSX_FILE_NAME: &str = "tracking_report.xlsx";
pub const DEFAULT_CSV_FILE_NAME: &str = "tracking_report.csv";
pub const DEFAULT_TITLE: &str = "Tracking Report";
pub const DEFAULT_LOGO_PATH: &str = "logo.png";

/// Most footer columns the document layout has room for.
pub const MAX_FOOTER_COLUMNS: usize = 3;

/// Footer used when none is configured: three empty contact columns.
#[must_use]
pub fn default_footer() -> Vec<FooterColumn> {
    ["Address", "Sales", "Support"]
        .into_iter()
        .map(|heading| FooterColumn::new(heading, &[]))
        .collect()
}
