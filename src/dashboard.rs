//! The dashboard controller.
//!
//! [`Dashboard`] owns the loaded record set together with the filter, sort
//! and page state. Every read derives a fresh view from those; nothing is
//! cached, so a delete or a filter edit is visible on the next call.

use crate::config::ExportConfig;
use crate::error::{ExportErrorKind, Result, StoreErrorKind, TrackboardError};
use crate::model::{Record, RecordId};
use crate::pipeline::{
    derive_view, filter_records, write_bytes_atomic, FilterOptions, FilterState, Page, Paginator,
    SortKey, SortState,
};
use crate::reports::{create_reporter_with_options, ReportContext, ReportFormat};
use crate::store::{AssetSource, RecordStore, Session};
use std::path::{Path, PathBuf};

/// Result of [`Dashboard::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Records were fetched
    Loaded(usize),
    /// The fetch failed; the dashboard holds an empty set
    Degraded(String),
}

impl LoadOutcome {
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// Result of [`Dashboard::delete_record`] when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The store accepted the delete and the record left the local set
    Deleted,
    /// The confirmation callback declined; nothing was sent
    Cancelled,
    /// No loaded record has that id; nothing was sent
    NotFound,
}

/// Record set plus view state.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    records: Vec<Record>,
    filter: FilterState,
    sort: SortState,
    page: usize,
    paginator: Paginator,
}

impl Dashboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already fetched record set.
    #[must_use]
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Replace the record set from the store.
    ///
    /// A failed fetch is not an error for the caller: it is logged, the
    /// dashboard is left with an empty set and the outcome says why.
    pub fn load(&mut self, store: &dyn RecordStore, session: &Session) -> LoadOutcome {
        match store.fetch_all(session) {
            Ok(records) => {
                tracing::info!(count = records.len(), store = %store.name(), "loaded records");
                self.records = records;
                self.page = 0;
                LoadOutcome::Loaded(self.records.len())
            }
            Err(e) => {
                tracing::error!(store = %store.name(), error = %e, "failed to load records");
                self.records.clear();
                self.page = 0;
                LoadOutcome::Degraded(e.to_string())
            }
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub const fn sort(&self) -> SortState {
        self.sort
    }

    /// Zero-based page index as last requested (clamped on read).
    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn paginator(&self) -> Paginator {
        self.paginator
    }

    /// Filtered and sorted records.
    #[must_use]
    pub fn view(&self) -> Vec<&Record> {
        derive_view(&self.records, &self.filter, self.sort)
    }

    /// The current page of a view obtained from [`Dashboard::view`].
    #[must_use]
    pub fn current_page<'a>(&self, view: &'a [&'a Record]) -> Page<'a> {
        self.paginator.page(view, self.page)
    }

    /// Number of pages in the current view.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.paginator.page_count(self.view().len())
    }

    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_records(&self.records)
    }

    /// Edit the filter in place. Returns to the first page.
    pub fn update_filter(&mut self, edit: impl FnOnce(&mut FilterState)) {
        edit(&mut self.filter);
        self.page = 0;
    }

    /// Replace the filter. Returns to the first page.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.page = 0;
    }

    /// Drop every filter. Returns to the first page.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.page = 0;
    }

    /// Advance the sort state for a column. Returns to the first page.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = self.sort.activate(key);
        self.page = 0;
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.page = 0;
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    pub fn last_page(&mut self) {
        self.page = self.page_count() - 1;
    }

    /// Jump to a page; out-of-range requests clamp to the last page.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = self.paginator.clamp(page, self.view().len());
    }

    #[must_use]
    pub fn find(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Delete a record after confirmation.
    ///
    /// The store is called only when `confirm` returns true. On success the
    /// record leaves the local set and the page is clamped; on failure the
    /// set is untouched and the error is returned.
    pub fn delete_record(
        &mut self,
        store: &dyn RecordStore,
        session: &Session,
        id: RecordId,
        confirm: impl FnOnce(&Record) -> bool,
    ) -> Result<DeleteOutcome> {
        let Some(record) = self.find(id) else {
            tracing::warn!(%id, "delete requested for unknown record");
            return Ok(DeleteOutcome::NotFound);
        };
        if !confirm(record) {
            tracing::debug!(%id, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(e) = store.delete(session, id) {
            tracing::error!(%id, error = %e, "delete failed");
            return Err(e);
        }

        self.records.retain(|r| r.id != id);
        self.page = self.paginator.clamp(self.page, self.view().len());
        tracing::info!(%id, remaining = self.records.len(), "deleted record");
        Ok(DeleteOutcome::Deleted)
    }

    /// Rows an export of `format` consumes.
    ///
    /// The workbook, CSV and PDF read the filtered order and ignore the
    /// on-screen sort; the PDF then regroups by owner. Other formats follow
    /// the view.
    #[must_use]
    pub fn export_rows(&self, format: ReportFormat) -> Vec<&Record> {
        match format {
            ReportFormat::Pdf | ReportFormat::Xlsx | ReportFormat::Csv => {
                filter_records(&self.records, &self.filter)
            }
            _ => self.view(),
        }
    }

    /// Render an export to bytes without touching the file system.
    ///
    /// Formats that carry a logo fetch it from `assets` first; a failed fetch
    /// fails the export.
    pub fn render(
        &self,
        format: ReportFormat,
        assets: &dyn AssetSource,
        config: &ExportConfig,
    ) -> Result<Vec<u8>> {
        let logo = match &config.logo_path {
            Some(path) if format.uses_logo() => Some(assets.fetch(path)?),
            _ => None,
        };
        let ctx = ReportContext::default()
            .with_title(config.title.clone())
            .with_logo(logo)
            .with_footer(config.footer.clone())
            .no_color();

        let rows = self.export_rows(format);
        let bytes = create_reporter_with_options(format, false).generate(&rows, &ctx)?;
        Ok(bytes)
    }

    /// Export to the configured location for `format`.
    pub fn export(
        &self,
        format: ReportFormat,
        assets: &dyn AssetSource,
        config: &ExportConfig,
    ) -> Result<PathBuf> {
        self.export_to(format, assets, config, &config.output_path(format))
    }

    /// Export to an explicit path. The file appears complete or not at all.
    pub fn export_to(
        &self,
        format: ReportFormat,
        assets: &dyn AssetSource,
        config: &ExportConfig,
        path: &Path,
    ) -> Result<PathBuf> {
        let result = self
            .render(format, assets, config)
            .and_then(|bytes| write_export(path, &bytes).map(|()| bytes.len()));

        match result {
            Ok(size) => {
                tracing::info!(%format, path = %path.display(), bytes = size, "export written");
                Ok(path.to_path_buf())
            }
            Err(e) => {
                tracing::error!(%format, path = %path.display(), error = %e, "export failed");
                Err(e)
            }
        }
    }
}

fn write_export(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_error = |message: String| {
        TrackboardError::export(
            format!("writing {}", path.display()),
            ExportErrorKind::Write(message),
        )
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
    }
    write_bytes_atomic(path, bytes).map_err(|e| write_error(format!("{e:#}")))
}

/// True when an error means the record is already gone upstream.
#[must_use]
pub const fn is_missing_upstream(err: &TrackboardError) -> bool {
    matches!(
        err,
        TrackboardError::Store {
            source: StoreErrorKind::NotFound(_),
            ..
        }
    )
}
