//! Small rendering helpers shared by the dashboard and its overlays.

use crate::tui::theme::colors;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Smallest terminal the dashboard lays out in.
pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

/// `Err` with the shortfall when the terminal is too small.
pub fn check_terminal_size(width: u16, height: u16) -> Result<(), (u16, u16)> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        Err((width, height))
    } else {
        Ok(())
    }
}

/// Full-screen notice shown instead of the dashboard on tiny terminals.
pub fn render_size_warning(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    let scheme = colors();
    let lines = vec![
        Line::styled("Terminal too small", Style::default().fg(scheme.warning).bold()),
        Line::from(""),
        Line::styled(
            format!(
                "Current: {}x{}  Required: {min_width}x{min_height}",
                area.width, area.height
            ),
            Style::default().fg(scheme.text_muted),
        ),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Render an empty state placeholder.
pub fn render_empty_state(frame: &mut Frame, area: Rect, message: &str, hint: Option<&str>) {
    let scheme = colors();
    let mut lines = vec![
        Line::from(""),
        Line::styled(message.to_string(), Style::default().fg(scheme.text_muted)),
    ];

    if let Some(h) = hint {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            h.to_string(),
            Style::default().fg(scheme.text_muted).italic(),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(scheme.border)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Render a popup overlay.
pub fn render_popup(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    content: Vec<Line<'static>>,
    size: (u16, u16),
    border_color: Color,
) {
    let popup_area = centered_rect(size.0, size.1, area);
    frame.render_widget(Clear, popup_area);

    let popup = Paragraph::new(content)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .title_style(Style::default().fg(border_color).bold())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(popup, popup_area);
}

/// Helper function to create a centered rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Truncate a string with ellipsis, using Unicode display width for accuracy.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut width = 0;
    let mut out: String = s
        .chars()
        .take_while(|ch| {
            let w = UnicodeWidthChar::width(*ch).unwrap_or(0);
            if width + w > budget {
                return false;
            }
            width += w;
            true
        })
        .collect();
    if max_width > 0 {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a longer value", 6), "a lon…");
        assert_eq!(truncate_str("abc", 0), "");
    }

    #[test]
    fn test_check_terminal_size() {
        assert!(check_terminal_size(120, 40).is_ok());
        assert_eq!(check_terminal_size(60, 40), Err((60, 40)));
    }

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(50, 40, area);
        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 25);
    }
}
