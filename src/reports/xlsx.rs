//! Spreadsheet report generator.
//!
//! One sheet named "Projects": the logo anchored at A1, a bold heading row on
//! row 5 and one row per record in the order given.

use super::{cell_value, ReportContext, ReportError, ReportFormat, ReportGenerator, SHEET_COLUMNS};
use crate::model::Record;
use rust_xlsxwriter::{Format, Image, Workbook, Worksheet, XlsxError};

pub const SHEET_NAME: &str = "Projects";
/// Zero-based row of the heading line (row 5 in the sheet).
pub const HEADER_ROW: u32 = 4;
pub const COLUMN_WIDTH: f64 = 18.0;
const LOGO_WIDTH_PX: f64 = 150.0;
const LOGO_HEIGHT_PX: f64 = 50.0;

/// Spreadsheet report generator
pub struct XlsxReporter;

impl XlsxReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for XlsxReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn xlsx_err(e: XlsxError) -> ReportError {
    ReportError::RenderError(e.to_string())
}

fn insert_logo(sheet: &mut Worksheet, bytes: &[u8]) {
    let image = match Image::new_from_buffer(bytes) {
        Ok(image) => image,
        Err(e) => {
            tracing::warn!("Skipping unreadable logo image: {e}");
            return;
        }
    };
    let scale_w = LOGO_WIDTH_PX / image.width().max(1.0);
    let scale_h = LOGO_HEIGHT_PX / image.height().max(1.0);
    let image = image.set_scale_width(scale_w).set_scale_height(scale_h);
    if let Err(e) = sheet.insert_image(0, 0, &image) {
        tracing::warn!("Could not place logo image: {e}");
    }
}

impl ReportGenerator for XlsxReporter {
    fn generate(&self, rows: &[&Record], ctx: &ReportContext) -> Result<Vec<u8>, ReportError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME).map_err(xlsx_err)?;

        if let Some(bytes) = ctx.logo.as_deref() {
            insert_logo(sheet, bytes);
        }

        for (col, field) in SHEET_COLUMNS.iter().enumerate() {
            let col = col as u16;
            sheet
                .write_string_with_format(HEADER_ROW, col, field.heading(), &bold)
                .map_err(xlsx_err)?;
            sheet.set_column_width(col, COLUMN_WIDTH).map_err(xlsx_err)?;
        }

        for (i, record) in rows.iter().enumerate() {
            let row = HEADER_ROW + 1 + i as u32;
            for (col, field) in SHEET_COLUMNS.iter().enumerate() {
                sheet
                    .write_string(row, col as u16, cell_value(record, *field))
                    .map_err(xlsx_err)?;
            }
        }

        tracing::debug!(rows = rows.len(), "built spreadsheet report");
        workbook.save_to_buffer().map_err(xlsx_err)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Xlsx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_zip_container() {
        let mut r = Record::new(1);
        r.owner = Some("Ana".into());
        let view = vec![&r];
        let bytes = XlsxReporter::new()
            .generate(&view, &ReportContext::default())
            .expect("workbook renders");
        // xlsx files are zip archives
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_logo_is_embedded() {
        let logo = include_bytes!("../../tests/fixtures/logo.png").to_vec();
        let ctx = ReportContext::default().with_logo(Some(logo));
        let with_logo = XlsxReporter::new().generate(&[], &ctx).expect("workbook renders");
        let plain = XlsxReporter::new()
            .generate(&[], &ReportContext::default())
            .expect("workbook renders");
        assert!(with_logo.starts_with(b"PK"));
        assert!(with_logo.len() > plain.len());
    }

    #[test]
    fn test_bad_logo_is_skipped() {
        let ctx = ReportContext::default().with_logo(Some(vec![0, 1, 2, 3]));
        assert!(XlsxReporter::new().generate(&[], &ctx).is_ok());
    }
}
