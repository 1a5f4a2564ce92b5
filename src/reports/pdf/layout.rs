//! Page layout for the PDF report.
//!
//! Layout is computed up front from the grouped rows: text is sanitized and
//! wrapped to column widths, row heights are measured, and rows are placed
//! onto pages with the table head repeated at the top of each one. The
//! painter only turns the result into drawing operations.
//!
//! All coordinates are millimetres measured from the top-left corner.

use crate::model::{Record, RecordField};
use crate::reports::cell_value;
use crate::reports::group::ReportRow;

pub const PAGE_WIDTH_MM: f32 = 297.0;
pub const PAGE_HEIGHT_MM: f32 = 210.0;
pub const MARGIN_X_MM: f32 = 14.0;

pub const LOGO_X_MM: f32 = 14.0;
pub const LOGO_Y_MM: f32 = 10.0;
pub const LOGO_WIDTH_MM: f32 = 40.0;
pub const LOGO_HEIGHT_MM: f32 = 15.0;

pub const TITLE_Y_MM: f32 = 20.0;
pub const TITLE_SIZE_PT: f32 = 16.0;
pub const RULE_Y_MM: f32 = 28.0;

pub const TABLE_TOP_MM: f32 = 35.0;
pub const TABLE_BOTTOM_MARGIN_MM: f32 = 35.0;

pub const FOOTER_HEIGHT_MM: f32 = 25.0;
pub const FOOTER_SIZE_PT: f32 = 6.5;

pub const BODY_SIZE_PT: f32 = 7.0;
pub const CELL_PADDING_MM: f32 = 1.5;

const PT_TO_MM: f32 = 0.352_778;
/// Average Helvetica glyph advance as a fraction of the font size.
const AVG_CHAR_EM: f32 = 0.5;
const LINE_SPACING: f32 = 1.25;

pub type Rgb8 = (u8, u8, u8);

pub const HEAD_FILL: Rgb8 = (15, 23, 42);
pub const HEAD_TEXT: Rgb8 = (255, 255, 255);
pub const GROUP_FILL: Rgb8 = (226, 232, 240);
pub const STRIPE_FILL: Rgb8 = (248, 250, 252);
pub const GRID_COLOR: Rgb8 = (200, 200, 200);
pub const FOOTER_FILL: Rgb8 = (235, 235, 235);
pub const BODY_TEXT: Rgb8 = (30, 30, 30);

/// Table columns, left to right, with their widths.
pub const COLUMNS: [(RecordField, f32); 9] = [
    (RecordField::EntryDate, 18.0),
    (RecordField::DueDate, 18.0),
    (RecordField::CompletedAt, 20.0),
    (RecordField::Requester, 28.0),
    (RecordField::Project, 38.0),
    (RecordField::Department, 22.0),
    (RecordField::CurrentTask, 38.0),
    (RecordField::Status, 22.0),
    (RecordField::Notes, 65.0),
];

/// Total table width.
#[must_use]
pub fn table_width() -> f32 {
    COLUMNS.iter().map(|(_, w)| w).sum()
}

/// Line height for a font size, in millimetres.
#[must_use]
pub fn line_height(size_pt: f32) -> f32 {
    size_pt * LINE_SPACING * PT_TO_MM
}

/// Approximate rendered width of a string, in millimetres.
#[must_use]
pub fn text_width(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * AVG_CHAR_EM * PT_TO_MM
}

/// Map text onto the single-byte range the built-in fonts can encode.
///
/// Dashes and curly quotes get ASCII stand-ins, whitespace collapses to a
/// space and anything else outside Latin-1 becomes `?`.
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2026}' => '.',
            c if c.is_whitespace() => ' ',
            c if c.is_control() => ' ',
            c if (c as u32) <= 0xFF => c,
            _ => '?',
        })
        .collect()
}

/// Greedy word wrap to a width. Words longer than a line are split.
#[must_use]
pub fn wrap(text: &str, width_mm: f32, size_pt: f32) -> Vec<String> {
    let per_char = size_pt * AVG_CHAR_EM * PT_TO_MM;
    let max_chars = ((width_mm / per_char).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let mut chars: Vec<char> = word.chars().collect();

        while chars.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(max_chars);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }

        let needed = if current_len == 0 {
            chars.len()
        } else {
            current_len + 1 + chars.len()
        };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += chars.len();
        current.extend(chars);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// A single wrapped cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellText {
    pub lines: Vec<String>,
    pub color: Rgb8,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    /// Repeated column headings
    Head(Vec<CellText>),
    /// Full-width owner break
    Group(String),
    Body { cells: Vec<CellText>, shaded: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    /// Distance of the row's top edge from the page top
    pub top: f32,
    pub height: f32,
    pub kind: RowKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub rows: Vec<PlacedRow>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableLayout {
    pub pages: Vec<PageLayout>,
}

impl TableLayout {
    /// Number of body rows across all pages.
    #[must_use]
    pub fn body_row_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.rows)
            .filter(|r| matches!(r.kind, RowKind::Body { .. }))
            .count()
    }

    /// Labels of all group rows, in order.
    #[must_use]
    pub fn group_labels(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|p| &p.rows)
            .filter_map(|r| match &r.kind {
                RowKind::Group(label) => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }
}

fn cell_height(lines: usize) -> f32 {
    lines.max(1) as f32 * line_height(BODY_SIZE_PT) + 2.0 * CELL_PADDING_MM
}

fn inner_width(width: f32) -> f32 {
    (width - 2.0 * CELL_PADDING_MM).max(1.0)
}

fn head_row() -> RowKind {
    RowKind::Head(
        COLUMNS
            .iter()
            .map(|(field, width)| CellText {
                lines: wrap(field.heading(), inner_width(*width), BODY_SIZE_PT),
                color: HEAD_TEXT,
                bold: true,
            })
            .collect(),
    )
}

fn body_cells(record: &Record) -> Vec<CellText> {
    COLUMNS
        .iter()
        .map(|(field, width)| {
            let text = sanitize(&cell_value(record, *field));
            let (color, bold) = match (*field, record.status_kind().rgb()) {
                (RecordField::Status, Some(rgb)) => (rgb, true),
                _ => (BODY_TEXT, false),
            };
            CellText {
                lines: wrap(&text, inner_width(*width), BODY_SIZE_PT),
                color,
                bold,
            }
        })
        .collect()
}

fn row_height(kind: &RowKind) -> f32 {
    match kind {
        RowKind::Head(cells) | RowKind::Body { cells, .. } => {
            cell_height(cells.iter().map(|c| c.lines.len()).max().unwrap_or(1))
        }
        RowKind::Group(_) => cell_height(1),
    }
}

struct Placer {
    pages: Vec<PageLayout>,
    current: PageLayout,
    y: f32,
    head: RowKind,
    head_height: f32,
}

impl Placer {
    fn new() -> Self {
        let head = head_row();
        let head_height = row_height(&head);
        let mut placer = Self {
            pages: Vec::new(),
            current: PageLayout::default(),
            y: TABLE_TOP_MM,
            head,
            head_height,
        };
        placer.place_head();
        placer
    }

    const fn bottom() -> f32 {
        PAGE_HEIGHT_MM - TABLE_BOTTOM_MARGIN_MM
    }

    fn place_head(&mut self) {
        self.current.rows.push(PlacedRow {
            top: self.y,
            height: self.head_height,
            kind: self.head.clone(),
        });
        self.y += self.head_height;
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = TABLE_TOP_MM;
        self.place_head();
    }

    /// Place a row, breaking to a new page when `reserve` more millimetres
    /// do not fit below the cursor. A row taller than a whole page is placed
    /// anyway at the top of a fresh page.
    fn place(&mut self, kind: RowKind, reserve: f32) {
        let height = row_height(&kind);
        let first_on_page = self.current.rows.len() == 1;
        if self.y + reserve.max(height) > Self::bottom() && !first_on_page {
            self.new_page();
        }
        self.current.rows.push(PlacedRow {
            top: self.y,
            height,
            kind,
        });
        self.y += height;
    }

    fn finish(mut self) -> TableLayout {
        self.pages.push(self.current);
        TableLayout { pages: self.pages }
    }
}

/// Lay the grouped rows out onto pages.
///
/// Every page starts with the table head. A group header is kept on the same
/// page as the first record that follows it. Shading alternates per record
/// and restarts after each group header.
#[must_use]
pub fn layout_table(rows: &[ReportRow<'_>]) -> TableLayout {
    let mut placer = Placer::new();
    let mut stripe = 0usize;

    for (i, row) in rows.iter().enumerate() {
        match row {
            ReportRow::GroupHeader(owner) => {
                let kind = RowKind::Group(sanitize(&format!("Owner: {owner}")));
                let next_height = rows
                    .get(i + 1)
                    .and_then(ReportRow::as_record)
                    .map_or(0.0, |r| {
                        row_height(&RowKind::Body {
                            cells: body_cells(r),
                            shaded: false,
                        })
                    });
                let reserve = row_height(&kind) + next_height;
                placer.place(kind, reserve);
                stripe = 0;
            }
            ReportRow::Record(record) => {
                let kind = RowKind::Body {
                    cells: body_cells(record),
                    shaded: stripe % 2 == 1,
                };
                placer.place(kind, 0.0);
                stripe += 1;
            }
        }
    }

    placer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::group::group_for_report;

    fn record(id: i64, owner: &str, notes: &str) -> Record {
        let mut r = Record::new(id);
        r.owner = Some(owner.to_string());
        r.notes = Some(notes.to_string());
        r.status = Some("completed".to_string());
        r.entry_date = Some("2024-05-10T09:00:00Z".to_string());
        r
    }

    #[test]
    fn test_columns_fill_printable_width() {
        let printable = PAGE_WIDTH_MM - 2.0 * MARGIN_X_MM;
        assert!((table_width() - printable).abs() < 0.01);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("a\u{2014}b"), "a-b");
        assert_eq!(sanitize("São\tPaulo"), "São Paulo");
        assert_eq!(sanitize("日本"), "??");
    }

    #[test]
    fn test_wrap_short_and_long() {
        assert_eq!(wrap("short", 30.0, BODY_SIZE_PT), vec!["short"]);
        assert_eq!(wrap("", 30.0, BODY_SIZE_PT), vec![""]);

        let long = "word ".repeat(40);
        let lines = wrap(long.trim(), 20.0, BODY_SIZE_PT);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| text_width(l, BODY_SIZE_PT) <= 20.0 + 0.01));
    }

    #[test]
    fn test_wrap_splits_unbroken_words() {
        let token = "x".repeat(100);
        let lines = wrap(&token, 10.0, BODY_SIZE_PT);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), token);
    }

    #[test]
    fn test_every_page_starts_with_head() {
        let records: Vec<Record> = (0..120)
            .map(|i| record(i, if i < 60 { "A" } else { "B" }, "note"))
            .collect();
        let view: Vec<&Record> = records.iter().collect();
        let layout = layout_table(&group_for_report(&view));

        assert!(layout.pages.len() > 1);
        for page in &layout.pages {
            assert!(matches!(page.rows[0].kind, RowKind::Head(_)));
            let last = page.rows.last().expect("non-empty page");
            assert!(last.top + last.height <= PAGE_HEIGHT_MM - TABLE_BOTTOM_MARGIN_MM + 0.01);
        }
        assert_eq!(layout.body_row_count(), 120);
        assert_eq!(layout.group_labels(), vec!["Owner: A", "Owner: B"]);
    }

    #[test]
    fn test_group_header_not_orphaned() {
        let records: Vec<Record> = (0..200)
            .map(|i| record(i, &format!("owner{:03}", i / 7), "n"))
            .collect();
        let view: Vec<&Record> = records.iter().collect();
        let layout = layout_table(&group_for_report(&view));

        for page in &layout.pages {
            let last = page.rows.last().expect("non-empty page");
            assert!(!matches!(last.kind, RowKind::Group(_)));
        }
    }

    #[test]
    fn test_status_cell_colored_and_bold() {
        let r = record(1, "A", "n");
        let view = vec![&r];
        let layout = layout_table(&group_for_report(&view));
        let RowKind::Body { cells, shaded } = &layout.pages[0].rows[1].kind else {
            panic!("expected body row");
        };
        assert!(!shaded);
        let status = &cells[7];
        assert_eq!(status.lines, vec!["DONE"]);
        assert!(status.bold);
        assert_eq!(status.color, (21, 128, 61));
        assert_eq!(cells[0].lines, vec!["10/05/2024"]);
        assert_eq!(cells[2].lines, vec!["-"]);
    }

    #[test]
    fn test_empty_report_has_head_only() {
        let layout = layout_table(&[]);
        assert_eq!(layout.pages.len(), 1);
        assert_eq!(layout.pages[0].rows.len(), 1);
    }
}
