//! Interactive dashboard using ratatui.
//!
//! The dashboard shows one page of the filtered and sorted record view at a
//! time, with a filter panel, tri-state column sorting, delete confirmation
//! and PDF or spreadsheet export.
//!
//! # Architecture
//!
//! [`App`] owns a [`crate::dashboard::Dashboard`] plus the interactive state
//! (selection, overlays, status line). Key handling in `events` only calls
//! `App` methods, so every action is testable without a terminal.

mod app;
mod events;
pub mod state;
pub mod theme;
mod ui;
pub(crate) mod widgets;

pub use app::{App, Bound, FilterField, FilterPanel, MessageKind, Overlay, StatusMessage};
pub use events::{handle_key_event, handle_mouse_event, Event, EventHandler};
pub use state::{ListNavigation, ListState};
pub use theme::{
    colors, current_theme_name, set_theme, toggle_theme, ColorScheme, FooterHints, Styles, Theme,
};
pub use ui::{render, run_dashboard_tui};
