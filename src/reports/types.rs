//! Report type definitions.

use chrono::{DateTime, Local};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Paginated, owner-grouped PDF document
    #[default]
    Pdf,
    /// Spreadsheet workbook with a single "Projects" sheet
    #[value(alias = "spreadsheet", alias = "excel")]
    Xlsx,
    /// CSV in spreadsheet column order
    Csv,
    /// Structured JSON output
    Json,
    /// Aligned table for the terminal
    Table,
}

impl ReportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Table => "txt",
        }
    }

    /// Whether the format produces a binary document.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self, Self::Pdf | Self::Xlsx)
    }

    /// Whether the emitter embeds the branding image.
    #[must_use]
    pub const fn uses_logo(self) -> bool {
        self.is_binary()
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Xlsx => write!(f, "xlsx"),
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
        }
    }
}

/// Contact block printed in the document footer, one entry per column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FooterColumn {
    pub heading: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

impl FooterColumn {
    #[must_use]
    pub fn new(heading: impl Into<String>, lines: &[&str]) -> Self {
        Self {
            heading: heading.into(),
            lines: lines.iter().map(|l| (*l).to_string()).collect(),
        }
    }
}

/// Everything an emitter needs besides the rows.
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// Document title
    pub title: String,
    /// Generation timestamp shown in metadata
    pub generated_at: DateTime<Local>,
    /// PNG bytes of the branding image, if it could be fetched
    pub logo: Option<Vec<u8>>,
    /// Footer contact columns
    pub footer: Vec<FooterColumn>,
    /// Use ANSI colors in terminal output
    pub use_color: bool,
}

impl Default for ReportContext {
    fn default() -> Self {
        Self {
            title: "Tracking Report".to_string(),
            generated_at: Local::now(),
            logo: None,
            footer: Vec::new(),
            use_color: true,
        }
    }
}

impl ReportContext {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_logo(mut self, logo: Option<Vec<u8>>) -> Self {
        self.logo = logo;
        self
    }

    #[must_use]
    pub fn with_footer(mut self, footer: Vec<FooterColumn>) -> Self {
        self.footer = footer;
        self
    }

    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(ReportFormat::Pdf.extension(), "pdf");
        assert_eq!(ReportFormat::Xlsx.extension(), "xlsx");
        assert!(ReportFormat::Xlsx.uses_logo());
        assert!(!ReportFormat::Csv.uses_logo());
    }

    #[test]
    fn test_value_enum_aliases() {
        assert_eq!(
            ReportFormat::from_str("spreadsheet", true).ok(),
            Some(ReportFormat::Xlsx)
        );
        assert_eq!(ReportFormat::from_str("PDF", true).ok(), Some(ReportFormat::Pdf));
    }
}
