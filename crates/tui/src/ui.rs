use crate::app::{App, Mode, Pane};
use crate::picker::FilePicker;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use textwrap::wrap;

const TAB: &str = "    ";

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Search input
            Constraint::Min(3),    // Original | Filtered
            Constraint::Length(1), // Footer help
        ])
        .split(area);

    draw_title(f, app, chunks[0]);
    draw_search(f, app, chunks[1]);
    draw_panes(f, app, chunks[2]);
    draw_footer(f, app, chunks[3]);

    let popup = centered_rect(70, 70, area);
    // borders + hint line
    app.picker_height = popup.height.saturating_sub(3) as usize;

    match &app.mode {
        Mode::Normal => {}
        Mode::Picker(picker) => draw_picker(f, picker, popup),
        Mode::Error(message) => draw_error(f, message, area),
    }
}

fn draw_title(f: &mut Frame, app: &App, area: Rect) {
    let path = app
        .service
        .document()
        .map(|doc| doc.path().display().to_string())
        .unwrap_or_else(|| String::from("no file loaded"));

    let title = Line::from(vec![
        Span::styled(" linesift ", Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::raw("  "),
        Span::styled(path, Style::default().bold()),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_search(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Search ")
        .border_style(Style::default().fg(Color::DarkGray));

    let prompt = Line::from(vec![
        Span::styled("❯ ", Style::default().fg(Color::Magenta).bold()),
        Span::raw(app.input.as_str()),
    ]);
    // clamp in usize, a pasted query can be wider than u16
    let max_x = area.right().saturating_sub(2);
    let cursor_x = (area.x as usize + 1 + prompt.width()).min(max_x as usize) as u16;

    f.render_widget(Paragraph::new(prompt).block(block), area);

    if matches!(app.mode, Mode::Normal) {
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_panes(f: &mut Frame, app: &mut App, area: Rect) {
    let split = app.config.split_percent;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(split),
            Constraint::Percentage(100 - split),
        ])
        .split(area);

    app.original_area = columns[0];
    app.filtered_area = columns[1];

    // clamp after a resize or a shorter result
    app.original_scroll = app.original_scroll.min(app.max_scroll(Pane::Original));
    app.filtered_scroll = app.filtered_scroll.min(app.max_scroll(Pane::Filtered));

    draw_original(f, app, columns[0]);
    draw_filtered(f, app, columns[1]);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .border_style(Style::default().fg(color))
}

fn draw_original(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Pane::Original;
    let rows = app.visible_rows(Pane::Original);

    let (title, lines) = match app.service.document() {
        Some(doc) => {
            let name = doc
                .path()
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let title = format!(" Original · {} ({} lines) ", name, doc.line_count());
            let gutter = gutter_width(doc.line_count(), app.config.line_numbers);
            let lines = doc
                .lines()
                .iter()
                .enumerate()
                .skip(app.original_scroll)
                .take(rows)
                .map(|(idx, text)| text_line(idx + 1, text, gutter))
                .collect();
            (title, lines)
        }
        None => (
            String::from(" Original "),
            vec![Line::from("Press Ctrl+O to load a file").dark_gray()],
        ),
    };

    f.render_widget(Paragraph::new(lines).block(pane_block(title, focused)), area);
}

fn draw_filtered(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Pane::Filtered;
    let rows = app.visible_rows(Pane::Filtered);

    let (title, lines) = match app.service.filtered() {
        Some(result) if result.is_empty() => (
            format!(" Filtered · \"{}\" (0 matches) ", result.query),
            vec![Line::from("No matching lines").dark_gray()],
        ),
        Some(result) => {
            let title = format!(" Filtered · \"{}\" ({} matches) ", result.query, result.len());
            let last = result.matches.last().map_or(0, |m| m.number);
            let gutter = gutter_width(last, app.config.line_numbers);
            let lines = result
                .matches
                .iter()
                .skip(app.filtered_scroll)
                .take(rows)
                .map(|m| text_line(m.number, &m.text, gutter))
                .collect();
            (title, lines)
        }
        None => (String::from(" Filtered "), Vec::new()),
    };

    f.render_widget(Paragraph::new(lines).block(pane_block(title, focused)), area);
}

/// Digits needed for the largest line number, or 0 when numbers are off.
fn gutter_width(max_number: usize, enabled: bool) -> usize {
    if enabled { max_number.max(1).to_string().len() } else { 0 }
}

fn text_line(number: usize, text: &str, gutter: usize) -> Line<'static> {
    let body = Span::raw(text.replace('\t', TAB));
    if gutter == 0 {
        return Line::from(body);
    }
    Line::from(vec![
        Span::styled(format!("{:>width$} │ ", number, width = gutter), Style::default().dark_gray()),
        body,
    ])
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let status_width = Line::from(app.status.as_str()).width() as u16 + 1;
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(status_width)])
        .split(area);

    let help = Line::from("Ctrl+O: Load File  •  Enter: Search  •  Tab: Switch Pane  •  Esc: Quit").gray();
    f.render_widget(Paragraph::new(help), halves[0]);
    f.render_widget(
        Paragraph::new(Line::from(app.status.as_str()).dim()).alignment(Alignment::Right),
        halves[1],
    );
}

fn draw_picker(f: &mut Frame, picker: &FilePicker, area: Rect) {
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" Load File · {} ", picker.dir.display()))
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let mut items: Vec<ListItem> = picker
        .items
        .iter()
        .map(|item| {
            let style = if item.is_dir() {
                Style::default().fg(Color::Blue).bold()
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(item.label(), style)))
        })
        .collect();

    if let Some(err) = &picker.error {
        items.push(ListItem::new(Line::from(Span::styled(err.clone(), Style::default().fg(Color::Red)))));
    }

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▸ ");
    let mut state = ListState::default().with_selected(Some(picker.selected));
    f.render_stateful_widget(list, parts[0], &mut state);

    let hint = Line::from("Enter: Open  •  Backspace: Up  •  Esc: Cancel").gray();
    f.render_widget(Paragraph::new(hint).alignment(Alignment::Right), parts[1]);
}

fn draw_error(f: &mut Frame, message: &str, area: Rect) {
    let width = area.width.saturating_sub(4).clamp(20, 64);
    let text_width = width.saturating_sub(4) as usize;

    let mut lines: Vec<Line> = wrap(message, text_width.max(1))
        .into_iter()
        .map(|l| Line::from(l.into_owned()))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from("[ OK ]".bold()).alignment(Alignment::Center));

    // borders + padding line
    let height = (lines.len() as u16 + 3).min(area.height);
    let popup = centered_fixed(width, height, area);

    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .title(" Error ")
        .title_style(Style::default().fg(Color::Red).bold())
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let body = Rect {
        x: inner.x + 1,
        y: inner.y + 1,
        width: inner.width.saturating_sub(2),
        height: inner.height.saturating_sub(1),
    };
    f.render_widget(Paragraph::new(lines), body);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}

fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linesift_core::config::AppConfig;
    use ratatui::{Terminal, backend::TestBackend};
    use std::fs;

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut screen = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                screen.push_str(buffer[(x, y)].symbol());
            }
            screen.push('\n');
        }
        screen
    }

    fn loaded_app(dir: &tempfile::TempDir, line_numbers: bool) -> App {
        let path = dir.path().join("fruit.txt");
        fs::write(&path, "Apple\nbanana\nGrape\npineapple\n").unwrap();
        let config = AppConfig {
            line_numbers,
            ..AppConfig::default()
        };
        let mut app = App::new(config);
        app.load_file(&path);
        app
    }

    #[test]
    fn empty_app_shows_load_hint() {
        let mut app = App::new(AppConfig::default());
        let screen = render(&mut app, 100, 20);
        assert!(screen.contains("no file loaded"));
        assert!(screen.contains("Press Ctrl+O to load a file"));
        assert!(screen.contains("Esc: Quit"));
    }

    #[test]
    fn panes_show_original_and_filtered_side_by_side() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(&dir, false);
        app.input = String::from("apple");
        app.run_search();

        let screen = render(&mut app, 100, 20);
        assert!(screen.contains("Original · fruit.txt (4 lines)"));
        assert!(screen.contains("Filtered · \"apple\" (2 matches)"));

        let banana_row = screen.lines().find(|l| l.contains("banana")).unwrap();
        // banana is only in the original pane
        assert_eq!(banana_row.matches("banana").count(), 1);
        let apple_row = screen.lines().find(|l| l.contains("Apple")).unwrap();
        assert_eq!(apple_row.matches("Apple").count(), 2);
    }

    #[test]
    fn line_number_gutter() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(&dir, true);
        app.input = String::from("pine");
        app.run_search();

        let screen = render(&mut app, 100, 20);
        assert!(screen.contains("4 │ pineapple"));
    }

    #[test]
    fn error_dialog_is_drawn_over_the_panes() {
        let mut app = App::new(AppConfig::default());
        app.input = String::from("apple");
        app.run_search();

        let screen = render(&mut app, 80, 20);
        assert!(screen.contains("Error"));
        assert!(screen.contains("Please load a file before searching."));
        assert!(screen.contains("[ OK ]"));
    }

    #[test]
    fn picker_lists_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let config = AppConfig {
            start_dir: Some(dir.path().to_string_lossy().to_string()),
            ..AppConfig::default()
        };
        let mut app = App::new(config);
        app.open_picker();

        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("Load File"));
        assert!(screen.contains("../"));
        assert!(screen.contains("notes.txt"));
    }

    #[test]
    fn oversized_query_keeps_cursor_in_search_box() {
        let mut app = App::new(AppConfig::default());
        app.on_paste(&"x".repeat(70_000));

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!(cursor, Position::new(78, 2));
    }

    #[test]
    fn scroll_is_clamped_on_draw() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = loaded_app(&dir, false);
        app.original_scroll = 99;
        render(&mut app, 100, 20);
        assert_eq!(app.original_scroll, 0);
    }
}
