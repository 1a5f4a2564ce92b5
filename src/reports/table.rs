//! Aligned terminal table, used by the `list` command.

use super::{cell_value, ReportContext, ReportError, ReportFormat, ReportGenerator};
use crate::model::{Record, RecordField, StatusKind};
use std::fmt::Write;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns shown in the terminal, with their display widths.
const COLUMNS: [(RecordField, usize); 8] = [
    (RecordField::EntryDate, 10),
    (RecordField::DueDate, 10),
    (RecordField::Owner, 16),
    (RecordField::Requester, 16),
    (RecordField::Project, 24),
    (RecordField::Department, 14),
    (RecordField::Status, 11),
    (RecordField::CompletedAt, 10),
];
const ID_WIDTH: usize = 6;

fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "blue" => format!("\x1b[34m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Table reporter for terminal output
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn status_color(kind: StatusKind) -> &'static str {
        match kind {
            StatusKind::Done => "green",
            StatusKind::Pending => "yellow",
            StatusKind::InProgress => "blue",
            StatusKind::Other => "",
        }
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate(&self, rows: &[&Record], ctx: &ReportContext) -> Result<Vec<u8>, ReportError> {
        let colored = self.colored && ctx.use_color;
        let mut out = String::new();

        let mut header = pad("ID", ID_WIDTH);
        for (field, width) in COLUMNS {
            header.push(' ');
            header.push_str(&pad(field.heading(), width));
        }
        writeln!(out, "{}", ansi_color(header.trim_end(), "bold", colored))?;
        let total = ID_WIDTH + COLUMNS.iter().map(|(_, w)| w + 1).sum::<usize>();
        writeln!(out, "{}", "─".repeat(total))?;

        for record in rows {
            let mut line = pad(&record.id.to_string(), ID_WIDTH);
            for (field, width) in COLUMNS {
                line.push(' ');
                let cell = pad(&truncate(&cell_value(record, field), width), width);
                if field == RecordField::Status {
                    let color = Self::status_color(record.status_kind());
                    line.push_str(&ansi_color(&cell, color, colored));
                } else {
                    line.push_str(&cell);
                }
            }
            writeln!(out, "{}", line.trim_end())?;
        }

        if rows.is_empty() {
            writeln!(out, "{}", ansi_color("No records match the current filters.", "dim", colored))?;
        }

        Ok(out.into_bytes())
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

/// Pad to a display width, accounting for wide characters.
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}

/// Truncate to a display width with a trailing ellipsis.
fn truncate(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        out.push(c);
    }
    out.push('…');
    out
}
