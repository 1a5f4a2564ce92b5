//! **Record-tracking dashboard: filter, sort, page and export work items.**
//!
//! `trackboard` loads tracking records (projects, tasks and their owners) from
//! a REST table or a local JSON file, derives a filtered and sorted view, and
//! presents it page by page in a terminal dashboard or on the command line.
//! The filtered set can be exported as a PDF report grouped by owner, an xlsx
//! workbook, CSV or JSON.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Record`] and its helpers. Raw status codes are mapped to
//!   canonical labels (`IN PROGRESS`, `PENDING`, `DONE`) by
//!   [`normalize_status`]; timestamps are displayed as `dd/mm/yyyy`.
//! - **[`pipeline`]**: the filter → sort → paginate view derivation.
//!   [`FilterState`] holds multi-select sets and inclusive date ranges,
//!   [`SortState`] cycles ascending → descending → off, and [`Paginator`]
//!   windows the view into pages of [`PAGE_SIZE`].
//! - **[`reports`]**: emitters behind the [`ReportGenerator`] trait.
//! - **[`store`]**: the [`RecordStore`] and [`AssetSource`] seams with REST,
//!   file and in-memory implementations.
//! - **[`dashboard`]**: [`Dashboard`] ties records, view state and export
//!   together; both the CLI and the TUI drive it.
//!
//! ## Getting Started
//!
//! ```no_run
//! use trackboard::{Dashboard, FileStore, Session, SortKey};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileStore::new("records.json");
//!     let mut dashboard = Dashboard::new();
//!     dashboard.load(&store, &Session::new("local")?);
//!
//!     dashboard.update_filter(|f| {
//!         f.toggle_status("PENDING");
//!     });
//!     dashboard.toggle_sort(SortKey::Due);
//!
//!     let view = dashboard.view();
//!     let page = dashboard.current_page(&view);
//!     println!("{}: {} rows", page.label(), page.rows.len());
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: usize/f32 casts in PDF layout math and TUI geometry are bounded
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // TUI render functions are inherently long
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod store;
pub mod tui;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ExportConfig, TuiConfig, Validatable};
pub use dashboard::{Dashboard, DeleteOutcome, LoadOutcome};
pub use error::{ErrorContext, OptionContext, Result, TrackboardError};
pub use model::{normalize_status, status_weight, Record, RecordField, RecordId};
pub use pipeline::{
    derive_view, status_counts, DateDimension, FilterDimension, FilterState, Page, Paginator,
    SortDirection, SortKey, SortState, PAGE_SIZE,
};
pub use reports::{create_reporter, ReportContext, ReportFormat, ReportGenerator};
pub use store::{AssetSource, FileStore, MemoryStore, RecordStore, RestStore, Session};
