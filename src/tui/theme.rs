//! Centralized theme and color scheme for the TUI.
//!
//! This module provides consistent styling across the dashboard and its
//! overlays.

use crate::model::StatusKind;
use ratatui::prelude::*;
use std::sync::{PoisonError, RwLock};

/// Color scheme for the TUI application.
/// Provides semantic colors for different UI elements.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    // Status colors
    pub in_progress: Color,
    pub pending: Color,
    pub done: Color,
    pub unknown_status: Color,

    // UI element colors
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub background_alt: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection: Color,
    pub highlight: Color,

    // Notice colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Badge foreground (text on colored backgrounds)
    pub badge_fg_dark: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Dark theme (default)
    pub const fn dark() -> Self {
        Self {
            in_progress: Color::Blue,
            pending: Color::Yellow,
            done: Color::Green,
            unknown_status: Color::DarkGray,

            primary: Color::Cyan,
            secondary: Color::Blue,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            background_alt: Color::Rgb(30, 30, 40),
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::Rgb(60, 60, 80),
            highlight: Color::Yellow,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            badge_fg_dark: Color::Black,
        }
    }

    /// Light theme
    pub const fn light() -> Self {
        Self {
            in_progress: Color::Rgb(37, 99, 235),
            pending: Color::Rgb(180, 120, 0),
            done: Color::Rgb(22, 130, 60),
            unknown_status: Color::Rgb(120, 120, 120),

            primary: Color::Rgb(0, 100, 160),
            secondary: Color::Rgb(0, 0, 180),
            accent: Color::Rgb(180, 100, 0),
            muted: Color::Rgb(140, 140, 140),
            border: Color::Rgb(160, 160, 160),
            border_focused: Color::Rgb(0, 100, 160),
            background_alt: Color::Rgb(235, 235, 240),
            text: Color::Black,
            text_muted: Color::Rgb(90, 90, 90),
            selection: Color::Rgb(200, 210, 230),
            highlight: Color::Rgb(180, 100, 0),

            success: Color::Rgb(0, 128, 0),
            warning: Color::Rgb(180, 120, 0),
            error: Color::Rgb(200, 0, 0),

            badge_fg_dark: Color::White,
        }
    }

    /// High contrast theme (accessibility)
    pub const fn high_contrast() -> Self {
        Self {
            in_progress: Color::LightBlue,
            pending: Color::LightYellow,
            done: Color::LightGreen,
            unknown_status: Color::White,

            primary: Color::LightCyan,
            secondary: Color::LightBlue,
            accent: Color::LightYellow,
            muted: Color::Gray,
            border: Color::White,
            border_focused: Color::LightYellow,
            background_alt: Color::Black,
            text: Color::White,
            text_muted: Color::White,
            selection: Color::Blue,
            highlight: Color::LightYellow,

            success: Color::LightGreen,
            warning: Color::LightYellow,
            error: Color::LightRed,

            badge_fg_dark: Color::Black,
        }
    }

    /// Foreground for a canonical status label.
    pub fn status_color(&self, label: &str) -> Color {
        match StatusKind::from_label(label) {
            StatusKind::InProgress => self.in_progress,
            StatusKind::Pending => self.pending,
            StatusKind::Done => self.done,
            StatusKind::Other => self.unknown_status,
        }
    }
}

/// Global theme instance (runtime switchable)
static THEME: RwLock<Theme> = RwLock::new(Theme::dark());

/// Theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub colors: ColorScheme,
    pub name: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub const fn dark() -> Self {
        Self {
            colors: ColorScheme::dark(),
            name: "dark",
        }
    }

    pub const fn light() -> Self {
        Self {
            colors: ColorScheme::light(),
            name: "light",
        }
    }

    pub const fn high_contrast() -> Self {
        Self {
            colors: ColorScheme::high_contrast(),
            name: "high-contrast",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "high-contrast" | "highcontrast" | "hc" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }

    /// Get the next theme in the rotation
    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            "light" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }
}

/// Get the current theme name
pub fn current_theme_name() -> &'static str {
    THEME.read().unwrap_or_else(PoisonError::into_inner).name
}

/// Set the current theme
pub fn set_theme(theme: Theme) {
    *THEME.write().unwrap_or_else(PoisonError::into_inner) = theme;
}

/// Toggle to the next theme in rotation (dark -> light -> high-contrast -> dark)
pub fn toggle_theme() -> &'static str {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = theme.next();
    theme.name
}

/// Convenience function to get current colors
pub fn colors() -> ColorScheme {
    THEME.read().unwrap_or_else(PoisonError::into_inner).colors
}

// ============================================================================
// Style Helpers
// ============================================================================

/// Common style presets for consistent UI elements
pub struct Styles;

impl Styles {
    pub fn header_title() -> Style {
        Style::default().fg(colors().primary).bold()
    }

    pub fn text() -> Style {
        Style::default().fg(colors().text)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(colors().text_muted)
    }

    pub fn column_header() -> Style {
        Style::default().fg(colors().accent).bold()
    }

    pub fn selected() -> Style {
        Style::default().bg(colors().selection).bold()
    }

    pub fn border() -> Style {
        Style::default().fg(colors().border)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(colors().border_focused)
    }

    pub fn shortcut_key() -> Style {
        Style::default().fg(colors().accent)
    }

    pub fn shortcut_desc() -> Style {
        Style::default().fg(colors().text_muted)
    }

    pub fn success() -> Style {
        Style::default().fg(colors().success)
    }

    pub fn warning() -> Style {
        Style::default().fg(colors().warning)
    }

    pub fn error() -> Style {
        Style::default().fg(colors().error)
    }
}

// ============================================================================
// Badge Rendering Helpers
// ============================================================================

/// Colored text for a canonical status label.
pub fn status_span(label: &str) -> Span<'static> {
    let color = colors().status_color(label);
    let style = if StatusKind::from_label(label) == StatusKind::Other {
        Style::default().fg(color)
    } else {
        Style::default().fg(color).bold()
    };
    Span::styled(label.to_string(), style)
}

/// Render a count badge
pub fn count_badge(count: usize, bg_color: Color) -> Span<'static> {
    let scheme = colors();
    Span::styled(
        format!(" {count} "),
        Style::default()
            .fg(scheme.badge_fg_dark)
            .bg(bg_color)
            .bold(),
    )
}

/// Render a filter badge showing current state
pub fn filter_badge(label: &str, value: &str) -> Vec<Span<'static>> {
    let scheme = colors();
    vec![
        Span::styled(format!("{label}: "), Style::default().fg(scheme.text_muted)),
        Span::styled(
            format!(" {value} "),
            Style::default()
                .fg(scheme.badge_fg_dark)
                .bg(scheme.accent)
                .bold(),
        ),
    ]
}

// ============================================================================
// Footer Hints
// ============================================================================

/// Context-specific footer hints
pub struct FooterHints;

impl FooterHints {
    /// Hints for the main table
    pub fn table() -> Vec<(&'static str, &'static str)> {
        vec![
            ("1-9", "sort"),
            ("←→", "page"),
            ("↑↓", "select"),
            ("f", "filters"),
            ("c", "clear"),
            ("d", "delete"),
            ("e", "export"),
            ("r", "reload"),
            ("T", "theme"),
            ("?", "help"),
            ("q", "quit"),
        ]
    }

    /// Hints inside the filter panel
    pub fn filter_panel() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Tab", "next field"),
            ("↑↓", "move"),
            ("Space", "toggle"),
            ("Enter", "edit date"),
            ("x", "clear field"),
            ("c", "clear all"),
            ("Esc", "close"),
        ]
    }
}

/// Render footer hints as spans
pub fn render_footer_hints(hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{key}]"), Styles::shortcut_key()));
        spans.push(Span::styled((*desc).to_string(), Styles::shortcut_desc()));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DONE, PENDING, UNKNOWN_STATUS};

    #[test]
    fn test_theme_rotation() {
        assert_eq!(Theme::dark().next().name, "light");
        assert_eq!(Theme::light().next().name, "high-contrast");
        assert_eq!(Theme::high_contrast().next().name, "dark");
        assert_eq!(Theme::from_name("HC").name, "high-contrast");
        assert_eq!(Theme::from_name("unknown").name, "dark");
    }

    #[test]
    fn test_status_colors() {
        let scheme = ColorScheme::dark();
        assert_eq!(scheme.status_color(DONE), Color::Green);
        assert_eq!(scheme.status_color(PENDING), Color::Yellow);
        assert_eq!(scheme.status_color(UNKNOWN_STATUS), Color::DarkGray);
    }

    #[test]
    fn test_footer_hints_render() {
        let spans = render_footer_hints(&[("q", "quit"), ("?", "help")]);
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0].content, "[q]");
    }
}
