//! PDF report generator.
//!
//! Landscape A4, grouped by owner. Each page carries the branding header
//! (logo, centered title, rule), the repeated table head and the contact
//! footer. Geometry comes from [`layout`]; this module only paints it.

pub mod layout;

use super::group::group_for_report;
use super::{FooterColumn, ReportContext, ReportError, ReportFormat, ReportGenerator};
use crate::model::Record;
use layout::{
    line_height, sanitize, text_width, CellText, PlacedRow, Rgb8, RowKind, TableLayout,
    BODY_SIZE_PT, CELL_PADDING_MM, COLUMNS, FOOTER_FILL, FOOTER_HEIGHT_MM, FOOTER_SIZE_PT,
    GRID_COLOR, GROUP_FILL, HEAD_FILL, LOGO_HEIGHT_MM, LOGO_WIDTH_MM, LOGO_X_MM, LOGO_Y_MM,
    MARGIN_X_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, RULE_Y_MM, STRIPE_FILL, TITLE_SIZE_PT,
    TITLE_Y_MM,
};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rect, Rgb,
};

/// Printed DPI assumed when scaling the logo.
const LOGO_DPI: f32 = 300.0;

/// PDF report generator
pub struct PdfReporter;

impl PdfReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for PdfReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for PdfReporter {
    fn generate(&self, rows: &[&Record], ctx: &ReportContext) -> Result<Vec<u8>, ReportError> {
        let grouped = group_for_report(rows);
        let table = layout::layout_table(&grouped);
        tracing::debug!(
            rows = rows.len(),
            pages = table.pages.len(),
            "laid out PDF report"
        );
        paint(&table, ctx)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Pdf
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    const fn pick(&self, bold: bool) -> &IndirectFontRef {
        if bold { &self.bold } else { &self.regular }
    }
}

fn render_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::RenderError(e.to_string())
}

fn paint(table: &TableLayout, ctx: &ReportContext) -> Result<Vec<u8>, ReportError> {
    let title = sanitize(&ctx.title);
    let (doc, first_page, first_layer) =
        PdfDocument::new(&title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Table");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_err)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_err)?,
    };

    let logo = ctx.logo.as_deref().and_then(decode_logo);

    for (index, page) in table.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Table");
            doc.get_page(page_ref).get_layer(layer_ref)
        };

        paint_header(&layer, &fonts, &title, logo.as_ref());
        for row in &page.rows {
            paint_row(&layer, &fonts, row);
        }
        paint_footer(&layer, &fonts, &ctx.footer);
    }

    doc.save_to_bytes().map_err(render_err)
}

/// Decode the branding image. An unreadable image is skipped with a warning
/// so the report still renders.
fn decode_logo(bytes: &[u8]) -> Option<Image> {
    match printpdf::image_crate::load_from_memory(bytes) {
        Ok(img) => Some(Image::from_dynamic_image(&img)),
        Err(e) => {
            tracing::warn!("Skipping unreadable logo image: {e}");
            None
        }
    }
}

/// Convert a top-down coordinate into PDF user space.
fn y(top_mm: f32) -> Mm {
    Mm(PAGE_HEIGHT_MM - top_mm)
}

fn rgb(color: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(color.0) / 255.0,
        f32::from(color.1) / 255.0,
        f32::from(color.2) / 255.0,
        None,
    ))
}

fn fill_rect(layer: &PdfLayerReference, x: f32, top: f32, width: f32, height: f32, color: Rgb8) {
    layer.set_fill_color(rgb(color));
    let rect = Rect::new(Mm(x), y(top + height), Mm(x + width), y(top)).with_mode(PaintMode::Fill);
    layer.add_rect(rect);
}

fn stroke_rect(layer: &PdfLayerReference, x: f32, top: f32, width: f32, height: f32) {
    layer.set_outline_color(rgb(GRID_COLOR));
    layer.set_outline_thickness(0.2);
    let rect =
        Rect::new(Mm(x), y(top + height), Mm(x + width), y(top)).with_mode(PaintMode::Stroke);
    layer.add_rect(rect);
}

fn hline(layer: &PdfLayerReference, x1: f32, x2: f32, top: f32, color: Rgb8) {
    layer.set_outline_color(rgb(color));
    layer.set_outline_thickness(0.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), y(top)), false),
            (Point::new(Mm(x2), y(top)), false),
        ],
        is_closed: false,
    });
}

#[derive(Clone, Copy)]
struct TextStyle {
    size: f32,
    color: Rgb8,
    bold: bool,
}

impl TextStyle {
    const fn body(color: Rgb8, bold: bool) -> Self {
        Self {
            size: BODY_SIZE_PT,
            color,
            bold,
        }
    }

    const fn footer(bold: bool) -> Self {
        Self {
            size: FOOTER_SIZE_PT,
            color: (60, 60, 60),
            bold,
        }
    }
}

fn text(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    content: &str,
    x: f32,
    baseline: f32,
    style: TextStyle,
) {
    layer.set_fill_color(rgb(style.color));
    layer.use_text(content, style.size, Mm(x), y(baseline), fonts.pick(style.bold));
}

fn paint_header(layer: &PdfLayerReference, fonts: &Fonts, title: &str, logo: Option<&Image>) {
    if let Some(image) = logo {
        let px_w = image.image.width.0.max(1) as f32;
        let px_h = image.image.height.0.max(1) as f32;
        let native_w = px_w / LOGO_DPI * 25.4;
        let native_h = px_h / LOGO_DPI * 25.4;
        Image::from(image.image.clone()).add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(LOGO_X_MM)),
                translate_y: Some(y(LOGO_Y_MM + LOGO_HEIGHT_MM)),
                scale_x: Some(LOGO_WIDTH_MM / native_w),
                scale_y: Some(LOGO_HEIGHT_MM / native_h),
                dpi: Some(LOGO_DPI),
                ..Default::default()
            },
        );
    }

    let title_x = (PAGE_WIDTH_MM - text_width(title, TITLE_SIZE_PT)) / 2.0;
    let style = TextStyle {
        size: TITLE_SIZE_PT,
        color: HEAD_FILL,
        bold: true,
    };
    text(layer, fonts, title, title_x.max(MARGIN_X_MM), TITLE_Y_MM, style);
    hline(layer, MARGIN_X_MM, PAGE_WIDTH_MM - MARGIN_X_MM, RULE_Y_MM, GRID_COLOR);
}

/// Baseline of the first text line in a row starting at `top`.
fn first_baseline(top: f32) -> f32 {
    top + CELL_PADDING_MM + line_height(BODY_SIZE_PT) * 0.75
}

fn paint_cells(layer: &PdfLayerReference, fonts: &Fonts, row: &PlacedRow, cells: &[CellText]) {
    let step = line_height(BODY_SIZE_PT);
    let mut x = MARGIN_X_MM;
    for ((_, width), cell) in COLUMNS.iter().zip(cells) {
        stroke_rect(layer, x, row.top, *width, row.height);
        let mut baseline = first_baseline(row.top);
        for line in &cell.lines {
            let style = TextStyle::body(cell.color, cell.bold);
            text(layer, fonts, line, x + CELL_PADDING_MM, baseline, style);
            baseline += step;
        }
        x += width;
    }
}

fn paint_row(layer: &PdfLayerReference, fonts: &Fonts, row: &PlacedRow) {
    let width = layout::table_width();
    match &row.kind {
        RowKind::Head(cells) => {
            fill_rect(layer, MARGIN_X_MM, row.top, width, row.height, HEAD_FILL);
            paint_cells(layer, fonts, row, cells);
        }
        RowKind::Group(label) => {
            fill_rect(layer, MARGIN_X_MM, row.top, width, row.height, GROUP_FILL);
            stroke_rect(layer, MARGIN_X_MM, row.top, width, row.height);
            let baseline = first_baseline(row.top);
            let style = TextStyle::body(HEAD_FILL, true);
            text(layer, fonts, label, MARGIN_X_MM + CELL_PADDING_MM, baseline, style);
        }
        RowKind::Body { cells, shaded } => {
            if *shaded {
                fill_rect(layer, MARGIN_X_MM, row.top, width, row.height, STRIPE_FILL);
            }
            paint_cells(layer, fonts, row, cells);
        }
    }
}

fn paint_footer(layer: &PdfLayerReference, fonts: &Fonts, columns: &[FooterColumn]) {
    let top = PAGE_HEIGHT_MM - FOOTER_HEIGHT_MM;
    fill_rect(layer, 0.0, top, PAGE_WIDTH_MM, FOOTER_HEIGHT_MM, FOOTER_FILL);

    if columns.is_empty() {
        return;
    }
    let column_width = (PAGE_WIDTH_MM - 2.0 * MARGIN_X_MM) / columns.len() as f32;
    let step = line_height(FOOTER_SIZE_PT);

    for (i, column) in columns.iter().enumerate() {
        let x = MARGIN_X_MM + column_width * i as f32;
        let mut baseline = top + 6.0;
        text(layer, fonts, &sanitize(&column.heading), x, baseline, TextStyle::footer(true));
        for line in &column.lines {
            baseline += step;
            text(layer, fonts, &sanitize(line), x, baseline, TextStyle::footer(false));
        }
    }
}
