//! Export command handler.
//!
//! Implements the `export` subcommand: write the filtered view as a PDF,
//! workbook, CSV or JSON file.

use super::Backend;
use crate::config::AppConfig;
use crate::pipeline::{exit_codes, FilterState, SortState};
use crate::reports::ReportFormat;
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Settings for one `export` invocation.
#[derive(Debug, Clone, Default)]
pub struct ExportCommandConfig {
    pub format: ReportFormat,
    pub filter: FilterState,
    pub sort: SortState,
    /// Overrides the configured output path
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
}

/// Run the export command
#[allow(clippy::needless_pass_by_value)]
pub fn run_export(app: &AppConfig, config: ExportCommandConfig) -> Result<i32> {
    if config.format == ReportFormat::Table {
        bail!("the table format is for terminal output; use `trackboard list` instead");
    }

    let backend = Backend::from_config(app)?;
    let (mut dashboard, outcome) = backend.load_dashboard(config.quiet);
    dashboard.set_filter(config.filter);
    dashboard.set_sort(config.sort);

    let path = config
        .output_file
        .unwrap_or_else(|| app.export.output_path(config.format));
    let written = dashboard.export_to(config.format, backend.assets.as_ref(), &app.export, &path)?;

    if !config.quiet {
        eprintln!(
            "Exported {} records to {}",
            dashboard.export_rows(config.format).len(),
            written.display()
        );
    }

    if outcome.is_degraded() {
        return Ok(exit_codes::DEGRADED);
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"[
        {"id": 1, "data_entrada": "2024-01-05", "lider_card": "Ana"},
        {"id": 2, "data_entrada": "2024-03-01", "lider_card": "Bruno"}
    ]"#;

    #[test]
    fn test_export_csv_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("records.json");
        std::fs::write(&source, DATA).unwrap();
        let app = AppConfig::builder().source_file(Some(source)).build();
        let out = dir.path().join("nested").join("out.csv");

        let code = run_export(
            &app,
            ExportCommandConfig {
                format: ReportFormat::Csv,
                output_file: Some(out.clone()),
                quiet: true,
                ..ExportCommandConfig::default()
            },
        )
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        let text = std::fs::read_to_string(out).unwrap();
        // newest first, as fetched
        let second_line = text.lines().nth(1).unwrap();
        assert!(second_line.starts_with("2,"));
    }

    #[test]
    fn test_export_pdf_without_logo_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("records.json");
        std::fs::write(&source, DATA).unwrap();
        let mut app = AppConfig::builder()
            .source_file(Some(source))
            .output_dir(dir.path())
            .build();
        app.export.asset_dir = Some(dir.path().join("assets"));

        let result = run_export(
            &app,
            ExportCommandConfig {
                format: ReportFormat::Pdf,
                quiet: true,
                ..ExportCommandConfig::default()
            },
        );
        assert!(result.is_err());
        assert!(!dir.path().join("tracking_report.pdf").exists());
    }

    #[test]
    fn test_table_format_rejected() {
        let app = AppConfig::default();
        let config = ExportCommandConfig {
            format: ReportFormat::Table,
            ..ExportCommandConfig::default()
        };
        assert!(run_export(&app, config).is_err());
    }
}
