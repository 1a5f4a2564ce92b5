//! Dashboard rendering and the terminal main loop.

use super::app::{App, Bound, FilterField, MessageKind, Overlay, EXPORT_CHOICES};
use super::events::{handle_key_event, handle_mouse_event, Event, EventHandler};
use super::theme::{
    colors, count_badge, filter_badge, render_footer_hints, status_span, FooterHints, Styles,
};
use super::widgets::{
    check_terminal_size, render_empty_state, render_popup, render_size_warning, truncate_str,
    MIN_HEIGHT, MIN_WIDTH,
};
use crate::model::RecordField;
use crate::pipeline::{status_counts, DateDimension, FilterDimension, SortKey};
use crate::reports::{cell_value, ReportFormat};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Row, Table, TableState},
};
use std::io::{self, stdout};

/// Run the dashboard until the user quits.
pub fn run_dashboard_tui(app: &mut App, mouse: bool) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::default();
    let result = (|| -> io::Result<()> {
        loop {
            terminal.draw(|frame| render(frame, app))?;

            match events.next()? {
                Event::Key(key) => handle_key_event(app, key),
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {}
                Event::Tick => app.tick += 1,
            }

            if app.should_quit {
                return Ok(());
            }
        }
    })();

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if check_terminal_size(area.width, area.height).is_err() {
        render_size_warning(frame, area, MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(8),    // table
            Constraint::Length(1), // pager + status line
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_table(frame, chunks[1], app);
    render_status_line(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);

    match &app.overlay {
        Overlay::None => {}
        Overlay::Help => render_help(frame, area),
        Overlay::Filters => render_filter_panel(frame, area, app),
        Overlay::ConfirmDelete(id) => {
            let summary = app
                .dashboard
                .find(*id)
                .map(|r| {
                    format!(
                        "{} / {}",
                        r.text_or_missing(RecordField::Project),
                        r.owner_label()
                    )
                })
                .unwrap_or_default();
            let scheme = colors();
            let content = vec![
                Line::from(format!("Delete record {id}?")),
                Line::styled(summary, Styles::text_muted()),
                Line::from(""),
                Line::styled("This cannot be undone.", Styles::warning()),
                Line::from(""),
                Line::from(vec![
                    Span::styled("[y]", Styles::shortcut_key()),
                    Span::styled(" delete  ", Styles::shortcut_desc()),
                    Span::styled("[n]", Styles::shortcut_key()),
                    Span::styled(" keep", Styles::shortcut_desc()),
                ]),
            ];
            render_popup(frame, area, "Confirm delete", content, (50, 35), scheme.error);
        }
        Overlay::Export { selected } => {
            let scheme = colors();
            let mut content = vec![Line::from("Export the filtered records as:"), Line::from("")];
            for (i, format) in EXPORT_CHOICES.iter().enumerate() {
                let marker = if i == *selected { "▶ " } else { "  " };
                let style = if i == *selected {
                    Styles::selected()
                } else {
                    Styles::text()
                };
                content.push(Line::styled(format!("{marker}{}", export_label(*format)), style));
            }
            content.push(Line::from(""));
            content.push(Line::styled("[Enter] export  [Esc] cancel", Styles::shortcut_desc()));
            render_popup(frame, area, "Export", content, (45, 35), scheme.primary);
        }
        Overlay::Notice { title, message } => {
            let scheme = colors();
            let mut content: Vec<Line<'static>> =
                message.lines().map(|l| Line::from(l.to_string())).collect();
            content.push(Line::from(""));
            content.push(Line::styled("Press any key to continue", Styles::text_muted()));
            render_popup(frame, area, title, content, (60, 40), scheme.error);
        }
    }
}

fn export_label(format: ReportFormat) -> &'static str {
    match format {
        ReportFormat::Pdf => "PDF report (grouped by owner)",
        ReportFormat::Xlsx => "Spreadsheet (.xlsx)",
        _ => "Other",
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let scheme = colors();
    let view = app.dashboard.view();

    let mut title = vec![
        Span::styled(" trackboard ", Styles::header_title()),
        Span::styled(
            format!("{} of {} records", view.len(), app.dashboard.records().len()),
            Styles::text_muted(),
        ),
    ];
    let sort = app.dashboard.sort();
    if !sort.is_none() {
        title.push(Span::raw("  "));
        title.extend(filter_badge("sort", &sort.to_string()));
    }

    let mut badges = vec![Span::raw(" ")];
    for (label, count) in status_counts(&view) {
        let color = scheme.status_color(&label);
        badges.push(Span::styled(format!("{label} "), Style::default().fg(color)));
        badges.push(count_badge(count, color));
        badges.push(Span::raw("  "));
    }
    let active = app.dashboard.filter().active_count();
    if active > 0 {
        badges.extend(filter_badge("filters", &active.to_string()));
    }

    let header = Paragraph::new(vec![Line::from(title), Line::from(badges)]).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Styles::border()),
    );
    frame.render_widget(header, area);
}

/// Column width constraints, in `SortKey::ALL` order.
const COLUMN_WIDTHS: [Constraint; 9] = [
    Constraint::Length(12),
    Constraint::Length(12),
    Constraint::Percentage(12),
    Constraint::Percentage(16),
    Constraint::Percentage(12),
    Constraint::Percentage(12),
    Constraint::Percentage(16),
    Constraint::Length(13),
    Constraint::Length(12),
];

fn column_header(n: usize, key: SortKey, app: &App) -> String {
    let arrow = app
        .dashboard
        .sort()
        .direction_of(key)
        .map_or("", |d| d.arrow());
    format!("{n} {key}{}{arrow}", if arrow.is_empty() { "" } else { " " })
}

fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.dashboard.view();
    let page = app.dashboard.current_page(&view);

    if page.rows.is_empty() {
        let (message, hint) = if app.dashboard.records().is_empty() {
            ("No records loaded", Some("Press r to reload"))
        } else {
            ("No records match the current filters", Some("Press c to clear filters"))
        };
        render_empty_state(frame, area, message, hint);
        return;
    }

    let header = Row::new(
        SortKey::ALL
            .iter()
            .enumerate()
            .map(|(i, key)| column_header(i + 1, *key, app)),
    )
    .style(Styles::column_header())
    .height(1);

    let rows = page.rows.iter().map(|record| {
        let cells = SortKey::ALL.iter().map(|key| {
            if *key == SortKey::Status {
                Line::from(status_span(&record.status_label()))
            } else {
                Line::from(truncate_str(&cell_value(record, key.field()), 40))
            }
        });
        Row::new(cells).style(Styles::text())
    });

    let table = Table::new(rows, COLUMN_WIDTHS)
        .header(header)
        .row_highlight_style(Styles::selected())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_focused()),
        );

    let mut state = TableState::default().with_selected(Some(app.rows.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.dashboard.view();
    let page = app.dashboard.current_page(&view);

    let mut spans = vec![Span::styled(format!(" {} ", page.label()), Styles::header_title())];
    if let Some(status) = &app.status {
        let style = match status.kind {
            MessageKind::Info => Styles::text_muted(),
            MessageKind::Success => Styles::success(),
            MessageKind::Warning => Styles::warning(),
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(status.text.clone(), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hints = if app.overlay == Overlay::Filters {
        FooterHints::filter_panel()
    } else {
        FooterHints::table()
    };
    frame.render_widget(Paragraph::new(Line::from(render_footer_hints(&hints))), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let scheme = colors();
    let entry = |key: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("{key:>10}  "), Styles::shortcut_key()),
            Span::styled(desc.to_string(), Styles::text()),
        ])
    };
    let content = vec![
        entry("1-9", "Sort by column (ascending, descending, off)"),
        entry("← → h l", "Previous / next page"),
        entry("PgUp PgDn", "Previous / next page"),
        entry("Home End", "First / last page"),
        entry("↑ ↓ j k", "Select row"),
        entry("f", "Open the filter panel"),
        entry("c", "Clear all filters"),
        entry("d", "Delete the selected record"),
        entry("e", "Export PDF or spreadsheet"),
        entry("r", "Reload records"),
        entry("T", "Cycle theme"),
        entry("?", "Toggle this help"),
        entry("q", "Quit"),
    ];
    render_popup(frame, area, "Help", content, (60, 60), scheme.primary);
}

fn render_filter_panel(frame: &mut Frame, area: Rect, app: &App) {
    let scheme = colors();
    let popup = super::widgets::centered_rect(80, 80, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Filters ")
        .title_style(Style::default().fg(scheme.primary).bold())
        .borders(Borders::ALL)
        .border_style(Styles::border_focused());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(5)])
        .split(inner);
    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    let options = app.dashboard.filter_options();
    let focused = app.filters.focused();
    for (i, dimension) in FilterDimension::ALL.iter().enumerate() {
        let selected = app.dashboard.filter().set(*dimension);
        let cursor = app.filters.cursor(*dimension).selected;
        let is_focused = focused == FilterField::List(*dimension);
        let items: Vec<ListItem> = options
            .values(*dimension)
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                let mark = if selected.contains(value) { "[x] " } else { "[ ] " };
                let text = format!("{mark}{}", truncate_str(value, 24));
                let mut style = if *dimension == FilterDimension::Status {
                    Style::default().fg(scheme.status_color(value))
                } else {
                    Styles::text()
                };
                if is_focused && idx == cursor {
                    style = style.patch(Styles::selected());
                }
                ListItem::new(text).style(style)
            })
            .collect();
        let border = if is_focused {
            Styles::border_focused()
        } else {
            Styles::border()
        };
        let list = List::new(items).block(
            Block::default()
                .title(format!(" {} ({}) ", dimension.label(), selected.len()))
                .borders(Borders::ALL)
                .border_style(border),
        );
        frame.render_widget(list, lists[i]);
    }

    let mut date_lines = Vec::new();
    for dimension in DateDimension::ALL {
        let mut spans = vec![Span::styled(
            format!("{:>10}: ", dimension.label()),
            Styles::text_muted(),
        )];
        for bound in [Bound::From, Bound::To] {
            let field = FilterField::Date(dimension, bound);
            let range = app.dashboard.filter().range(dimension);
            let value = match bound {
                Bound::From => range.from,
                Bound::To => range.to,
            };
            let text = if focused == field
                && let Some(input) = &app.filters.input
            {
                format!("{input}▏")
            } else {
                value.map_or_else(|| "any".to_string(), |d| d.format("%Y-%m-%d").to_string())
            };
            let style = if focused == field {
                Styles::selected()
            } else {
                Styles::text()
            };
            let label = match bound {
                Bound::From => "from ",
                Bound::To => "  to ",
            };
            spans.push(Span::styled(label, Styles::text_muted()));
            spans.push(Span::styled(format!("{text:<11}"), style));
        }
        date_lines.push(Line::from(spans));
    }
    if let Some(error) = &app.filters.error {
        date_lines.push(Line::styled(error.clone(), Styles::error()));
    } else {
        date_lines.push(Line::styled(
            format!("Editing: {}", focused.label()),
            Styles::text_muted(),
        ));
    }
    frame.render_widget(Paragraph::new(date_lines), rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfig;
    use crate::model::Record;
    use crate::store::{FileAssetSource, MemoryStore, Session};
    use ratatui::backend::TestBackend;

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app(n: i64) -> App {
        let records = (1..=n)
            .map(|i| {
                let mut r = Record::new(i);
                r.status = Some("completed".to_string());
                r.project = Some(format!("Project {i}"));
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
    fn test_render_table_and_pager() {
        let app = app(20);
        let text = screen_text(&app);
        assert!(text.contains("Page 1 of 2"));
        assert!(text.contains("DONE"));
        assert!(text.contains("1 Entry"));
    }

    #[test]
    fn test_render_sort_indicator() {
        let mut app = app(3);
        app.toggle_sort(SortKey::Project);
        let text = screen_text(&app);
        assert!(text.contains("4 Project ↑"));
    }

    #[test]
    fn test_render_empty_state() {
        let app = app(0);
        let text = screen_text(&app);
        assert!(text.contains("No records loaded"));
        assert!(text.contains("Page 1 of 1"));
    }

    #[test]
    fn test_render_small_terminal() {
        let app = app(1);
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Terminal too small"));
    }
}
