//! Event handling for the TUI.
//!
//! Polls crossterm for key and mouse input and dispatches it to the
//! [`App`] actions. Overlays take every key while open.

use super::app::{App, FilterField, Overlay};
use crate::config::TuiPreferences;
use crate::pipeline::SortKey;
use crate::tui::theme::toggle_theme;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

/// Application event
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal tick
    Tick,
    /// Resize event
    Resize(u16, u16),
}

/// Event handler
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub const fn new(tick_rate: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event, std::io::Error> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Ok(Event::Key(key)),
                CrosstermEvent::Mouse(mouse) => Ok(Event::Mouse(mouse)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}

/// Handle key events and update app state
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    app.clear_status_message();

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.overlay.clone() {
        Overlay::None => {}
        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::Notice { .. } => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ConfirmDelete(_) => {
            match key.code {
                KeyCode::Char('y' | 'Y') => app.answer_delete(true),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => app.answer_delete(false),
                _ => {}
            }
            return;
        }
        Overlay::Export { .. } => {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => app.overlay = Overlay::None,
                KeyCode::Up | KeyCode::Char('k') => app.move_export_selection(false),
                KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                    app.move_export_selection(true);
                }
                KeyCode::Enter => app.confirm_export(),
                _ => {}
            }
            return;
        }
        Overlay::Filters => {
            handle_filter_panel_key(app, key);
            return;
        }
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('f') => app.open_filters(),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('e') => app.open_export(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('T') => {
            let theme_name = toggle_theme();
            let prefs = TuiPreferences {
                theme: theme_name.to_string(),
            };
            if let Err(e) = prefs.save() {
                tracing::debug!("could not save preferences: {e}");
            }
        }
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(key) = c.to_digit(10).and_then(|n| SortKey::from_index(n as usize)) {
                app.toggle_sort(key);
            }
        }
        KeyCode::Left | KeyCode::Char('h') => app.prev_page(),
        KeyCode::Right | KeyCode::Char('l') => app.next_page(),
        KeyCode::PageUp => app.prev_page(),
        KeyCode::PageDown => app.next_page(),
        KeyCode::Home => app.first_page(),
        KeyCode::End => app.last_page(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        _ => {}
    }
}

fn handle_filter_panel_key(app: &mut App, key: KeyEvent) {
    if app.filters.input.is_some() {
        match key.code {
            KeyCode::Esc => {
                app.filters.input = None;
                app.filters.error = None;
            }
            KeyCode::Enter => app.filter_enter(),
            KeyCode::Backspace => app.filter_input_pop(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => app.filter_input_push(c),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('f' | 'q') => app.overlay = Overlay::None,
        KeyCode::Tab | KeyCode::Right => app.filters.next_field(),
        KeyCode::BackTab | KeyCode::Left => app.filters.prev_field(),
        KeyCode::Up | KeyCode::Char('k') => app.filter_cursor_move(false),
        KeyCode::Down | KeyCode::Char('j') => app.filter_cursor_move(true),
        KeyCode::Char(' ') => {
            if matches!(app.filters.focused(), FilterField::List(_)) {
                app.filter_toggle();
            }
        }
        KeyCode::Enter => app.filter_enter(),
        KeyCode::Char('x') | KeyCode::Backspace => app.filter_clear_field(),
        KeyCode::Char('c') => app.clear_filters(),
        _ => {}
    }
}

/// Scroll moves the row selection; any click dismisses a blocking notice.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp if app.overlay == Overlay::None => app.select_prev(),
        MouseEventKind::ScrollDown if app.overlay == Overlay::None => app.select_next(),
        MouseEventKind::Down(_) if matches!(app.overlay, Overlay::Notice { .. }) => {
            app.overlay = Overlay::None;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfig;
    use crate::model::Record;
    use crate::pipeline::SortDirection;
    use crate::store::{FileAssetSource, MemoryStore, Session};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(n: i64) -> App {
        let records = (1..=n)
            .map(|i| {
                let mut r = Record::new(i);
                r.owner = Some(format!("Owner {}", i % 2));
                r
            })
            .collect();
        let mut app = App::new(
            Box::new(MemoryStore::new(records)),
            Box::new(FileAssetSource::new(".")),
            Session::new("t").unwrap(),
            ExportConfig::default(),
        );
        app.reload();
        app
    }

    #[test]
    fn test_quit() {
        let mut app = app(1);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_sort_keys_cycle() {
        let mut app = app(3);
        let first = SortKey::from_index(1).unwrap();
        handle_key_event(&mut app, key(KeyCode::Char('1')));
        assert_eq!(
            app.dashboard.sort().active(),
            Some((first, SortDirection::Ascending))
        );
        handle_key_event(&mut app, key(KeyCode::Char('1')));
        assert_eq!(
            app.dashboard.sort().active(),
            Some((first, SortDirection::Descending))
        );
        handle_key_event(&mut app, key(KeyCode::Char('1')));
        assert!(app.dashboard.sort().is_none());
    }

    #[test]
    fn test_paging_keys() {
        let mut app = app(40);
        handle_key_event(&mut app, key(KeyCode::Right));
        assert_eq!(app.dashboard.page_index(), 1);
        handle_key_event(&mut app, key(KeyCode::End));
        assert_eq!(app.dashboard.page_index(), 2);
        handle_key_event(&mut app, key(KeyCode::PageUp));
        assert_eq!(app.dashboard.page_index(), 1);
        handle_key_event(&mut app, key(KeyCode::Home));
        assert_eq!(app.dashboard.page_index(), 0);
        handle_key_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.dashboard.page_index(), 0);
    }

    #[test]
    fn test_delete_confirm_keys() {
        let mut app = app(2);
        handle_key_event(&mut app, key(KeyCode::Char('d')));
        assert!(matches!(app.overlay, Overlay::ConfirmDelete(_)));
        // Unrelated keys leave the dialog open
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        assert!(matches!(app.overlay, Overlay::ConfirmDelete(_)));
        handle_key_event(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.dashboard.records().len(), 2);

        handle_key_event(&mut app, key(KeyCode::Char('d')));
        handle_key_event(&mut app, key(KeyCode::Char('y')));
        assert_eq!(app.dashboard.records().len(), 1);
    }

    #[test]
    fn test_filter_panel_keys() {
        let mut app = app(10);
        handle_key_event(&mut app, key(KeyCode::Char('f')));
        assert_eq!(app.overlay, Overlay::Filters);
        handle_key_event(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.dashboard.view().len(), 5);
        handle_key_event(&mut app, key(KeyCode::Char('c')));
        assert!(app.dashboard.filter().is_empty());
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = app(1);
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.overlay, Overlay::Help);
        handle_key_event(&mut app, key(KeyCode::Char('d')));
        assert_eq!(app.overlay, Overlay::Help);
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.overlay, Overlay::None);
    }
}
