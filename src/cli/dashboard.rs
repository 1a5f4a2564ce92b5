//! Dashboard command handler.

use super::Backend;
use crate::config::{AppConfig, TuiPreferences};
use crate::pipeline::{exit_codes, FilterState, SortState};
use crate::tui::{run_dashboard_tui, set_theme, App, Theme};
use anyhow::Result;

/// Initial state for the interactive dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
    pub filter: FilterState,
    pub sort: SortState,
}

/// Run the dashboard command
#[allow(clippy::needless_pass_by_value)]
pub fn run_dashboard(app: &AppConfig, config: DashboardConfig) -> Result<i32> {
    set_theme(Theme::from_name(&theme_name(app)));

    let Backend {
        store,
        assets,
        session,
    } = Backend::from_config(app)?;

    let mut tui = App::new(store, assets, session, app.export.clone());
    tui.dashboard.set_filter(config.filter);
    tui.dashboard.set_sort(config.sort);
    tui.reload();

    run_dashboard_tui(&mut tui, app.tui.mouse_enabled)?;
    Ok(exit_codes::SUCCESS)
}

/// A theme saved from inside the dashboard wins over the config file.
fn theme_name(app: &AppConfig) -> String {
    let saved = TuiPreferences::config_path().is_some_and(|p| p.exists());
    if saved {
        TuiPreferences::load().theme
    } else {
        app.tui.theme.clone()
    }
}
