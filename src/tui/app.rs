//! Dashboard application state.
//!
//! [`App`] wraps a [`Dashboard`] with the interactive bits: row selection,
//! the filter panel, overlays and the status line. All actions are plain
//! methods so they can be driven from tests without a terminal.

use super::state::{ListNavigation, ListState};
use crate::config::ExportConfig;
use crate::dashboard::{Dashboard, DeleteOutcome, LoadOutcome};
use crate::model::{parse_date_bound, Record, RecordId};
use crate::pipeline::{DateDimension, FilterDimension, SortKey};
use crate::reports::ReportFormat;
use crate::store::{AssetSource, RecordStore, Session};

/// Formats offered by the export dialog.
pub const EXPORT_CHOICES: [ReportFormat; 2] = [ReportFormat::Pdf, ReportFormat::Xlsx];

/// A one-line message under the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
    /// Survives the next key press
    pub sticky: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
}

/// Modal layer drawn over the table. Only one is open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Help,
    Filters,
    ConfirmDelete(RecordId),
    Export {
        selected: usize,
    },
    /// Blocking notice, dismissed by any key
    Notice {
        title: String,
        message: String,
    },
}

/// Lower or upper end of a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    From,
    To,
}

/// One focusable field in the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    List(FilterDimension),
    Date(DateDimension, Bound),
}

impl FilterField {
    /// Panel order: the four lists, then from/to for each date dimension.
    pub const ALL: [Self; 10] = [
        Self::List(FilterDimension::Owner),
        Self::List(FilterDimension::Department),
        Self::List(FilterDimension::Requester),
        Self::List(FilterDimension::Status),
        Self::Date(DateDimension::Entry, Bound::From),
        Self::Date(DateDimension::Entry, Bound::To),
        Self::Date(DateDimension::Due, Bound::From),
        Self::Date(DateDimension::Due, Bound::To),
        Self::Date(DateDimension::Completed, Bound::From),
        Self::Date(DateDimension::Completed, Bound::To),
    ];

    pub fn label(self) -> String {
        match self {
            Self::List(dim) => dim.label().to_string(),
            Self::Date(dim, Bound::From) => format!("{} from", dim.label()),
            Self::Date(dim, Bound::To) => format!("{} to", dim.label()),
        }
    }
}

/// Filter panel cursor and date input buffer.
#[derive(Debug, Clone, Default)]
pub struct FilterPanel {
    /// Index into [`FilterField::ALL`]
    pub field: usize,
    /// Cursor per multi-select list, in `FilterDimension::ALL` order
    pub cursors: [ListState; 4],
    /// Date being typed, when editing
    pub input: Option<String>,
    pub error: Option<String>,
}

impl FilterPanel {
    pub fn focused(&self) -> FilterField {
        FilterField::ALL[self.field % FilterField::ALL.len()]
    }

    pub fn next_field(&mut self) {
        self.field = (self.field + 1) % FilterField::ALL.len();
        self.input = None;
        self.error = None;
    }

    pub fn prev_field(&mut self) {
        self.field = (self.field + FilterField::ALL.len() - 1) % FilterField::ALL.len();
        self.input = None;
        self.error = None;
    }

    pub fn cursor(&self, dimension: FilterDimension) -> &ListState {
        &self.cursors[dimension_index(dimension)]
    }

    fn cursor_mut(&mut self, dimension: FilterDimension) -> &mut ListState {
        &mut self.cursors[dimension_index(dimension)]
    }
}

fn dimension_index(dimension: FilterDimension) -> usize {
    FilterDimension::ALL
        .iter()
        .position(|d| *d == dimension)
        .unwrap_or(0)
}

/// Interactive dashboard state.
pub struct App {
    pub dashboard: Dashboard,
    store: Box<dyn RecordStore>,
    assets: Box<dyn AssetSource>,
    session: Session,
    export: ExportConfig,
    /// Selected row within the current page
    pub rows: ListState,
    pub filters: FilterPanel,
    pub overlay: Overlay,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
    pub tick: u64,
}

impl App {
    pub fn new(
        store: Box<dyn RecordStore>,
        assets: Box<dyn AssetSource>,
        session: Session,
        export: ExportConfig,
    ) -> Self {
        Self {
            dashboard: Dashboard::new(),
            store,
            assets,
            session,
            export,
            rows: ListState::new(),
            filters: FilterPanel::default(),
            overlay: Overlay::None,
            status: None,
            should_quit: false,
            tick: 0,
        }
    }

    /// Fetch records. A failure leaves an empty table and a sticky warning.
    pub fn reload(&mut self) {
        match self.dashboard.load(self.store.as_ref(), &self.session) {
            LoadOutcome::Loaded(count) => {
                self.set_status(format!("Loaded {count} records"), MessageKind::Info);
            }
            LoadOutcome::Degraded(reason) => {
                self.status = Some(StatusMessage {
                    text: format!("Could not load records: {reason} (press r to retry)"),
                    kind: MessageKind::Warning,
                    sticky: true,
                });
            }
        }
        self.sync_rows();
    }

    pub fn set_status(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
            sticky: false,
        });
    }

    /// Drop a non-sticky status message.
    pub fn clear_status_message(&mut self) {
        if self.status.as_ref().is_some_and(|s| !s.sticky) {
            self.status = None;
        }
    }

    fn notice(&mut self, title: &str, message: String) {
        self.overlay = Overlay::Notice {
            title: title.to_string(),
            message,
        };
    }

    /// Number of rows on the current page.
    pub fn page_len(&self) -> usize {
        let view = self.dashboard.view();
        self.dashboard.current_page(&view).rows.len()
    }

    /// Recompute the row count after any change to the view.
    fn sync_rows(&mut self) {
        let len = self.page_len();
        self.rows.resize(len);
    }

    /// The record under the cursor, if the page is not empty.
    pub fn selected_record(&self) -> Option<&Record> {
        let view = self.dashboard.view();
        let page = self.dashboard.current_page(&view);
        let id = page.rows.get(self.rows.selected).map(|r| r.id)?;
        self.dashboard.find(id)
    }

    // ------------------------------------------------------------------
    // Table actions
    // ------------------------------------------------------------------

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.dashboard.toggle_sort(key);
        self.rows.go_first();
        self.sync_rows();
    }

    pub fn next_page(&mut self) {
        self.dashboard.next_page();
        self.rows.go_first();
        self.sync_rows();
    }

    pub fn prev_page(&mut self) {
        self.dashboard.prev_page();
        self.rows.go_first();
        self.sync_rows();
    }

    pub fn first_page(&mut self) {
        self.dashboard.first_page();
        self.rows.go_first();
        self.sync_rows();
    }

    pub fn last_page(&mut self) {
        self.dashboard.last_page();
        self.rows.go_first();
        self.sync_rows();
    }

    pub fn select_next(&mut self) {
        self.rows.select_next();
    }

    pub fn select_prev(&mut self) {
        self.rows.select_prev();
    }

    pub fn clear_filters(&mut self) {
        self.dashboard.clear_filters();
        self.filters.input = None;
        self.filters.error = None;
        self.rows.go_first();
        self.sync_rows();
        self.set_status("Filters cleared", MessageKind::Info);
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Open the confirmation dialog for the selected row.
    pub fn request_delete(&mut self) {
        match self.selected_record().map(|r| r.id) {
            Some(id) => self.overlay = Overlay::ConfirmDelete(id),
            None => self.set_status("Nothing selected", MessageKind::Warning),
        }
    }

    /// Answer the confirmation dialog.
    pub fn answer_delete(&mut self, confirmed: bool) {
        let Overlay::ConfirmDelete(id) = self.overlay else {
            return;
        };
        self.overlay = Overlay::None;

        let result = self.dashboard.delete_record(
            self.store.as_ref(),
            &self.session,
            id,
            |_| confirmed,
        );
        match result {
            Ok(DeleteOutcome::Deleted) => {
                self.sync_rows();
                self.set_status(format!("Deleted record {id}"), MessageKind::Success);
            }
            Ok(DeleteOutcome::Cancelled) => {
                self.set_status("Delete cancelled", MessageKind::Info);
            }
            Ok(DeleteOutcome::NotFound) => {
                self.sync_rows();
                self.set_status(format!("Record {id} is no longer loaded"), MessageKind::Warning);
            }
            Err(e) => self.notice("Delete failed", format!("Record {id} was kept.\n\n{e}")),
        }
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    pub fn open_export(&mut self) {
        self.overlay = Overlay::Export { selected: 0 };
    }

    pub fn move_export_selection(&mut self, forward: bool) {
        if let Overlay::Export { selected } = &mut self.overlay {
            let n = EXPORT_CHOICES.len();
            *selected = if forward {
                (*selected + 1) % n
            } else {
                (*selected + n - 1) % n
            };
        }
    }

    /// Run the export chosen in the dialog.
    pub fn confirm_export(&mut self) {
        let Overlay::Export { selected } = self.overlay else {
            return;
        };
        self.overlay = Overlay::None;
        let format = EXPORT_CHOICES[selected % EXPORT_CHOICES.len()];
        self.export_as(format);
    }

    pub fn export_as(&mut self, format: ReportFormat) {
        match self
            .dashboard
            .export(format, self.assets.as_ref(), &self.export)
        {
            Ok(path) => self.set_status(
                format!("Exported to {}", path.display()),
                MessageKind::Success,
            ),
            Err(e) => self.notice("Export failed", e.to_string()),
        }
    }

    // ------------------------------------------------------------------
    // Filter panel
    // ------------------------------------------------------------------

    pub fn open_filters(&mut self) {
        let options = self.dashboard.filter_options();
        for dimension in FilterDimension::ALL {
            let len = options.values(dimension).len();
            self.filters.cursor_mut(dimension).resize(len);
        }
        self.overlay = Overlay::Filters;
    }

    pub fn filter_cursor_move(&mut self, forward: bool) {
        if let FilterField::List(dimension) = self.filters.focused() {
            let cursor = self.filters.cursor_mut(dimension);
            if forward {
                cursor.select_next();
            } else {
                cursor.select_prev();
            }
        }
    }

    /// Toggle the option under the cursor in the focused list.
    pub fn filter_toggle(&mut self) {
        let FilterField::List(dimension) = self.filters.focused() else {
            return;
        };
        let options = self.dashboard.filter_options();
        let index = self.filters.cursor(dimension).selected;
        if let Some(value) = options.values(dimension).get(index).cloned() {
            self.dashboard.update_filter(|f| {
                f.toggle(dimension, &value);
            });
            self.rows.go_first();
            self.sync_rows();
        }
    }

    /// Start editing the focused date field, or commit the edit in progress.
    pub fn filter_enter(&mut self) {
        let FilterField::Date(dimension, bound) = self.filters.focused() else {
            self.filter_toggle();
            return;
        };
        match self.filters.input.take() {
            None => {
                let range = self.dashboard.filter().range(dimension);
                let current = match bound {
                    Bound::From => range.from,
                    Bound::To => range.to,
                };
                self.filters.input = Some(
                    current
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                );
                self.filters.error = None;
            }
            Some(text) if text.trim().is_empty() => {
                self.set_date_bound(dimension, bound, None);
            }
            Some(text) => match parse_date_bound(&text) {
                Ok(date) => self.set_date_bound(dimension, bound, Some(date)),
                Err(_) => {
                    self.filters.error = Some(format!("'{text}' is not a YYYY-MM-DD date"));
                    self.filters.input = Some(text);
                }
            },
        }
    }

    /// Remove the focused field's selections or bound.
    pub fn filter_clear_field(&mut self) {
        match self.filters.focused() {
            FilterField::List(dimension) => {
                let selected: Vec<String> =
                    self.dashboard.filter().set(dimension).iter().cloned().collect();
                self.dashboard.update_filter(|f| {
                    for value in &selected {
                        f.toggle(dimension, value);
                    }
                });
                self.rows.go_first();
                self.sync_rows();
            }
            FilterField::Date(dimension, bound) => {
                self.filters.input = None;
                self.set_date_bound(dimension, bound, None);
            }
        }
    }

    pub fn filter_input_push(&mut self, c: char) {
        if let Some(input) = &mut self.filters.input {
            input.push(c);
        }
    }

    pub fn filter_input_pop(&mut self) {
        if let Some(input) = &mut self.filters.input {
            input.pop();
        }
    }

    fn set_date_bound(
        &mut self,
        dimension: DateDimension,
        bound: Bound,
        date: Option<chrono::NaiveDate>,
    ) {
        self.dashboard.update_filter(|f| {
            let range = f.range_mut(dimension);
            match bound {
                Bound::From => range.from = date,
                Bound::To => range.to = date,
            }
        });
        self.filters.error = None;
        self.rows.go_first();
        self.sync_rows();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileAssetSource, MemoryStore};
    use std::sync::Arc;

    /// Shares a `MemoryStore` between the app and the test body.
    struct SharedStore(Arc<MemoryStore>);

    impl RecordStore for SharedStore {
        fn fetch_all(&self, session: &Session) -> crate::error::Result<Vec<Record>> {
            self.0.fetch_all(session)
        }
        fn delete(&self, session: &Session, id: RecordId) -> crate::error::Result<()> {
            self.0.delete(session, id)
        }
        fn name(&self) -> String {
            self.0.name()
        }
    }

    fn records(n: i64) -> Vec<Record> {
        (1..=n)
            .map(|i| {
                let mut r = Record::new(i);
                r.entry_date = Some(format!("2024-01-{:02}", i.min(28)));
                r.owner = Some(if i % 3 == 0 { "Carla" } else { "Ana" }.to_string());
                r.status = Some("waiting".to_string());
                r
            })
            .collect()
    }

    fn app_with(n: i64) -> (App, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new(records(n)));
        let mut app = App::new(
            Box::new(SharedStore(Arc::clone(&store))),
            Box::new(FileAssetSource::new("/nonexistent")),
            Session::new("t").unwrap(),
            ExportConfig::default(),
        );
        app.reload();
        (app, store)
    }

    #[test]
    fn test_reload_degraded_is_sticky() {
        let (mut app, store) = app_with(3);
        store.set_fail_fetches(true);
        app.reload();
        assert!(app.dashboard.records().is_empty());
        let status = app.status.clone().unwrap();
        assert!(status.sticky);
        app.clear_status_message();
        assert!(app.status.is_some());
    }

    #[test]
    fn test_delete_flow() {
        let (mut app, store) = app_with(3);
        app.request_delete();
        let Overlay::ConfirmDelete(id) = app.overlay else {
            panic!("expected confirmation dialog");
        };
        app.answer_delete(false);
        assert_eq!(store.len(), 3);

        app.overlay = Overlay::ConfirmDelete(id);
        app.answer_delete(true);
        assert_eq!(store.len(), 2);
        assert!(app.dashboard.find(id).is_none());
        assert_eq!(app.rows.total, 2);
    }

    #[test]
    fn test_delete_failure_shows_notice() {
        let (mut app, store) = app_with(2);
        store.set_fail_deletes(true);
        app.request_delete();
        app.answer_delete(true);
        assert!(matches!(app.overlay, Overlay::Notice { .. }));
        assert_eq!(app.dashboard.records().len(), 2);
    }

    #[test]
    fn test_export_failure_shows_notice() {
        let (mut app, _) = app_with(2);
        app.open_export();
        app.confirm_export();
        match &app.overlay {
            Overlay::Notice { title, .. } => assert_eq!(title, "Export failed"),
            other => panic!("unexpected overlay {other:?}"),
        }
    }

    #[test]
    fn test_filter_panel_toggle_and_clear() {
        let (mut app, _) = app_with(30);
        app.open_filters();
        // owners sorted: Ana, Carla
        app.filter_cursor_move(true);
        app.filter_toggle();
        assert_eq!(app.dashboard.view().len(), 10);
        assert_eq!(app.dashboard.page_index(), 0);

        app.filter_clear_field();
        assert_eq!(app.dashboard.view().len(), 30);
    }

    #[test]
    fn test_date_input() {
        let (mut app, _) = app_with(20);
        app.open_filters();
        while app.filters.focused() != FilterField::Date(DateDimension::Entry, Bound::From) {
            app.filters.next_field();
        }
        app.filter_enter();
        for c in "2024-13-40".chars() {
            app.filter_input_push(c);
        }
        app.filter_enter();
        assert!(app.filters.error.is_some());
        assert!(app.dashboard.filter().is_empty());

        app.filters.input = Some(String::new());
        for c in "2024-01-11".chars() {
            app.filter_input_push(c);
        }
        app.filter_enter();
        assert!(app.filters.error.is_none());
        assert_eq!(app.dashboard.view().len(), 10);
    }

    #[test]
    fn test_paging_resets_selection() {
        let (mut app, _) = app_with(20);
        app.select_next();
        app.select_next();
        app.next_page();
        assert_eq!(app.rows.selected, 0);
        assert_eq!(app.rows.total, 5);
    }
}
