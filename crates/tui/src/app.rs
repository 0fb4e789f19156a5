use crate::picker::{self, FilePicker};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use linesift_core::SearchService;
use linesift_core::SiftError;
use linesift_core::config::AppConfig;
use ratatui::layout::Rect;
use std::path::Path;
use tracing::{info, warn};

const MOUSE_SCROLL_LINES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    Original,
    Filtered,
}

pub enum Mode {
    Normal,
    Picker(FilePicker),
    /// Modal error dialog; blocks all other input until dismissed.
    Error(String),
}

pub struct App {
    pub service: SearchService,
    pub config: AppConfig,
    pub input: String,
    pub mode: Mode,
    pub focus: Pane,
    pub original_scroll: usize,
    pub filtered_scroll: usize,
    // Last rendered pane areas, for mouse hit-testing and paging
    pub original_area: Rect,
    pub filtered_area: Rect,
    pub picker_height: usize,
    pub status: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            service: SearchService::new(config.search_source),
            config,
            input: String::new(),
            mode: Mode::Normal,
            focus: Pane::Original,
            original_scroll: 0,
            filtered_scroll: 0,
            original_area: Rect::default(),
            filtered_area: Rect::default(),
            picker_height: 10,
            status: String::from("No file loaded"),
            should_quit: false,
        }
    }

    pub fn load_file(&mut self, path: &Path) {
        match self.service.load(path) {
            Ok(doc) => {
                self.status = format!("Loaded {} lines", doc.line_count());
                self.original_scroll = 0;
                self.filtered_scroll = 0;
            }
            Err(e) => self.show_error(&e),
        }
    }

    pub fn run_search(&mut self) {
        match self.service.search(&self.input) {
            Ok(result) => {
                info!("search {:?}: {} matches", result.query.as_str(), result.len());
                self.status = format!("{} matching lines", result.len());
                self.filtered_scroll = 0;
            }
            Err(e) => self.show_error(&e),
        }
    }

    pub fn open_picker(&mut self) {
        let loaded = self.service.document().map(|doc| doc.path());
        let dir = picker::start_dir(self.config.start_dir(), loaded);
        self.mode = Mode::Picker(FilePicker::open(dir, self.config.show_hidden));
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn show_error(&mut self, err: &SiftError) {
        warn!("{}", err);
        self.mode = Mode::Error(err.to_string());
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // raw mode swallows SIGINT, so Ctrl+C always exits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match self.mode {
            Mode::Error(_) => self.on_error_key(key),
            Mode::Picker(_) => self.on_picker_key(key),
            Mode::Normal => self.on_normal_key(key),
        }
    }

    fn on_error_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.mode = Mode::Normal;
        }
    }

    fn on_picker_key(&mut self, key: KeyEvent) {
        let page = self.picker_height;
        let Mode::Picker(picker) = &mut self.mode else {
            return;
        };

        let chosen = match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                return;
            }
            KeyCode::Up => {
                picker.previous();
                None
            }
            KeyCode::Down => {
                picker.next();
                None
            }
            KeyCode::PageUp => {
                picker.page_up(page);
                None
            }
            KeyCode::PageDown => {
                picker.page_down(page);
                None
            }
            KeyCode::Home => {
                picker.first();
                None
            }
            KeyCode::End => {
                picker.last();
                None
            }
            KeyCode::Backspace | KeyCode::Left => {
                picker.parent();
                None
            }
            KeyCode::Enter | KeyCode::Right => picker.activate(),
            _ => None,
        };

        if let Some(path) = chosen {
            self.mode = Mode::Normal;
            self.load_file(&path);
        }
    }

    fn on_normal_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Char('q') if ctrl => self.quit(),
            KeyCode::Char('o') if ctrl => self.open_picker(),
            KeyCode::F(2) => self.open_picker(),
            KeyCode::Char('u') if ctrl => self.input.clear(),
            KeyCode::Enter => self.run_search(),
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::Up => self.scroll_up(self.focus, 1),
            KeyCode::Down => self.scroll_down(self.focus, 1),
            KeyCode::PageUp => self.scroll_up(self.focus, self.page_size(self.focus)),
            KeyCode::PageDown => self.scroll_down(self.focus, self.page_size(self.focus)),
            KeyCode::Home => *self.scroll_mut(self.focus) = 0,
            KeyCode::End => *self.scroll_mut(self.focus) = self.max_scroll(self.focus),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(self.mode, Mode::Normal) {
            return;
        }
        let pane = self.pane_at(mouse.column, mouse.row).unwrap_or(self.focus);
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_up(pane, MOUSE_SCROLL_LINES),
            MouseEventKind::ScrollDown => self.scroll_down(pane, MOUSE_SCROLL_LINES),
            MouseEventKind::Down(_) => {
                if let Some(clicked) = self.pane_at(mouse.column, mouse.row) {
                    self.focus = clicked;
                }
            }
            _ => {}
        }
    }

    pub fn on_paste(&mut self, text: &str) {
        if !matches!(self.mode, Mode::Normal) {
            return;
        }
        // the query is a single line
        let flattened = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
        self.input.push_str(&flattened);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Original => Pane::Filtered,
            Pane::Filtered => Pane::Original,
        };
    }

    pub fn line_count(&self, pane: Pane) -> usize {
        match pane {
            Pane::Original => self.service.document().map_or(0, |doc| doc.line_count()),
            Pane::Filtered => self.service.filtered().map_or(0, |f| f.len()),
        }
    }

    /// Rows available for text inside a pane's border.
    pub fn visible_rows(&self, pane: Pane) -> usize {
        self.area(pane).height.saturating_sub(2) as usize
    }

    pub fn max_scroll(&self, pane: Pane) -> usize {
        self.line_count(pane).saturating_sub(self.visible_rows(pane))
    }

    pub fn scroll_up(&mut self, pane: Pane, lines: usize) {
        let offset = self.scroll_mut(pane);
        *offset = offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, pane: Pane, lines: usize) {
        let max = self.max_scroll(pane);
        let offset = self.scroll_mut(pane);
        *offset = (*offset + lines).min(max);
    }

    fn page_size(&self, pane: Pane) -> usize {
        self.visible_rows(pane).max(1)
    }

    fn scroll_mut(&mut self, pane: Pane) -> &mut usize {
        match pane {
            Pane::Original => &mut self.original_scroll,
            Pane::Filtered => &mut self.filtered_scroll,
        }
    }

    fn area(&self, pane: Pane) -> Rect {
        match pane {
            Pane::Original => self.original_area,
            Pane::Filtered => self.filtered_area,
        }
    }

    fn pane_at(&self, column: u16, row: u16) -> Option<Pane> {
        let hit = |r: Rect| column >= r.x && column < r.right() && row >= r.y && row < r.bottom();
        if hit(self.original_area) {
            Some(Pane::Original)
        } else if hit(self.filtered_area) {
            Some(Pane::Filtered)
        } else {
            None
        }
    }
}
