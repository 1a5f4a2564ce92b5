//! List command handler.
//!
//! Implements the `list` subcommand: fetch, filter, sort and print one page
//! (or all) of the view.

use super::Backend;
use crate::config::AppConfig;
use crate::pipeline::{
    exit_codes, should_use_color, write_output, FilterState, OutputTarget, SortState,
};
use crate::reports::{create_reporter_with_options, ReportContext, ReportFormat};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Text formats the `list` command can print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl From<ListFormat> for ReportFormat {
    fn from(format: ListFormat) -> Self {
        match format {
            ListFormat::Table => Self::Table,
            ListFormat::Json => Self::Json,
            ListFormat::Csv => Self::Csv,
        }
    }
}

/// Settings for one `list` invocation.
#[derive(Debug, Clone, Default)]
pub struct ListConfig {
    pub filter: FilterState,
    pub sort: SortState,
    /// One-based page to print; all rows when absent
    pub page: Option<usize>,
    pub format: ListFormat,
    pub output_file: Option<PathBuf>,
    pub no_color: bool,
    pub quiet: bool,
}

/// Run the list command
#[allow(clippy::needless_pass_by_value)]
pub fn run_list(app: &AppConfig, config: ListConfig) -> Result<i32> {
    let backend = Backend::from_config(app)?;
    let (mut dashboard, outcome) = backend.load_dashboard(config.quiet);

    dashboard.set_filter(config.filter);
    dashboard.set_sort(config.sort);
    let view = dashboard.view();

    let paginator = dashboard.paginator();

    let rows = match config.page {
        Some(page) => {
            let page = paginator.page(&view, page.saturating_sub(1));
            if !config.quiet {
                eprintln!("{} ({} records, sorted: {})", page.label(), page.total_rows, config.sort);
            }
            page.rows.to_vec()
        }
        None => view.clone(),
    };

    let target = OutputTarget::from_option(config.output_file.clone());
    let use_color = should_use_color(config.no_color) && target.is_terminal();
    let ctx = ReportContext::default().with_title(app.export.title.clone());
    let ctx = if use_color { ctx } else { ctx.no_color() };

    let reporter = create_reporter_with_options(config.format.into(), use_color);
    let bytes = reporter
        .generate(&rows, &ctx)
        .context("failed to render listing")?;
    let text = String::from_utf8(bytes).context("listing is not valid UTF-8")?;
    write_output(text.trim_end(), &target, config.quiet)?;

    tracing::debug!(
        rows = rows.len(),
        pages = paginator.page_count(view.len()),
        "listing printed"
    );

    if outcome.is_degraded() {
        return Ok(exit_codes::DEGRADED);
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SortKey;

    const DATA: &str = r#"[
        {"id": 1, "data_entrada": "2024-01-05", "lider_card": "Ana", "status": "waiting"},
        {"id": 2, "data_entrada": "2024-03-01", "lider_card": "Bruno", "status": "completed"},
        {"id": 3, "data_entrada": "2024-02-01", "lider_card": "Ana", "status": "active"}
    ]"#;

    fn app_with_source(dir: &std::path::Path) -> AppConfig {
        let path = dir.join("records.json");
        std::fs::write(&path, DATA).unwrap();
        AppConfig::builder().source_file(Some(path)).build()
    }

    #[test]
    fn test_list_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with_source(dir.path());
        let out = dir.path().join("list.json");

        let mut filter = FilterState::new();
        filter.toggle_owner("Ana");
        let code = run_list(
            &app,
            ListConfig {
                filter,
                sort: SortState::NONE.activate(SortKey::Entry),
                format: ListFormat::Json,
                output_file: Some(out.clone()),
                quiet: true,
                ..ListConfig::default()
            },
        )
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        let ids: Vec<i64> = json["records"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_list_degraded_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let app = AppConfig::builder()
            .source_file(Some(dir.path().join("missing.json")))
            .build();
        let code = run_list(
            &app,
            ListConfig {
                output_file: Some(dir.path().join("out.csv")),
                format: ListFormat::Csv,
                quiet: true,
                ..ListConfig::default()
            },
        )
        .unwrap();
        assert_eq!(code, exit_codes::DEGRADED);
    }
}
