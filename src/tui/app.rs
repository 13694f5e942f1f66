use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::info;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use crate::config::AppConfig;
use crate::state::{AppState, LoadOutcome, Loader};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{banner, header, next_prayer, prayers, statusbar};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Help,
}

/// Key handling result the event loop has to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Locate,
}

pub struct App {
    pub view: View,
    pub state: AppState,
    pub hijri_offset: i32,
    pub should_quit: bool,
    pub now: NaiveDateTime,
    load_in_flight: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        App {
            view: View::Dashboard,
            state: AppState::new(config.location.clone()),
            hijri_offset: config.display.hijri_offset,
            should_quit: false,
            now: Local::now().naive_local(),
            load_in_flight: false,
        }
    }

    pub fn tick(&mut self, now: NaiveDateTime) {
        self.now = now;
        self.state.tick(now);
    }

    /// Kick off a locate-and-fetch on a worker thread. Ignored while one is running.
    pub fn start_load(&mut self, loader: &Arc<Loader>, tx: Sender<Event>) {
        if self.load_in_flight {
            return;
        }
        self.load_in_flight = true;
        self.state.begin_load();

        let loader = Arc::clone(loader);
        thread::spawn(move || {
            let outcome = loader.load_with(|text| {
                let _ = tx.send(Event::Progress(text));
            });
            let _ = tx.send(Event::Loaded(Box::new(outcome)));
        });
    }

    pub fn finish_load(&mut self, outcome: LoadOutcome, now: NaiveDateTime) {
        info!(
            "Showing {} ({:?})",
            outcome.location.label(),
            outcome.fetched.source
        );
        self.load_in_flight = false;
        self.now = now;
        self.state.apply(outcome, now);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Only handle actual key presses; ignore release/repeat events from some terminals
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        match self.view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                    self.view = View::Dashboard;
                }
                Action::None
            }
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('x') => {
                self.state.dismiss_notices();
            }
            KeyCode::Char('l') => {
                if !self.load_in_flight {
                    return Action::Locate;
                }
            }
            _ => {}
        }
        Action::None
    }

    pub fn draw(&self, frame: &mut Frame) {
        self.draw_dashboard(frame);
        if self.view == View::Help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let banner_height = banner::height(self.state.is_loading(), self.state.notices.len());
        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),             // header
                Constraint::Length(banner_height), // location + banners
                Constraint::Min(0),                // body
                Constraint::Length(1),             // status bar
            ])
            .split(area);

        header::render(frame, outer_chunks[0], self.now, self.hijri_offset);
        banner::render(
            frame,
            outer_chunks[1],
            &self.state.location,
            self.state.source,
            self.state.loading,
            &self.state.notices,
        );
        statusbar::render(frame, outer_chunks[3], !self.state.notices.is_empty());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(outer_chunks[2]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(columns[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(columns[1]);

        let next = self.state.next_prayer.as_ref();
        prayers::render(
            frame,
            left[0],
            self.state.schedule.as_ref(),
            next.map(|(n, _)| n.prayer),
        );
        next_prayer::render(frame, right[0], next);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).max(9).min(area.height),
        };

        frame.render_widget(Clear, popup_area);

        let rows = [
            ("  [l]    ", "إعادة تحديد الموقع وتحميل الأوقات"),
            ("  [x]    ", "إخفاء التنبيهات"),
            ("  [?]    ", "إظهار المساعدة أو إخفاؤها"),
            ("  [q/Esc]", "خروج"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  اختصارات لوحة المفاتيح",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in rows {
            help_text.push(Line::from(vec![
                Span::styled(key, theme::gold()),
                Span::styled(format!("  {}", label), theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" مساعدة ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(config: AppConfig) -> Result<()> {
    let loader = Arc::new(Loader::from_config(&config));
    let mut app = App::new(&config);

    let mut terminal = ratatui::init();
    let events = EventHandler::new(config.display.tick_rate());
    app.start_load(&loader, events.sender());

    let result = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        match events.next() {
            Ok(Event::Key(key)) => {
                if app.handle_key(key) == Action::Locate {
                    app.start_load(&loader, events.sender());
                }
                if app.should_quit {
                    break Ok(());
                }
            }
            Ok(Event::Tick) => app.tick(Local::now().naive_local()),
            Ok(Event::Progress(text)) => app.state.show_progress(text),
            Ok(Event::Loaded(outcome)) => app.finish_load(*outcome, Local::now().naive_local()),
            Err(e) => break Err(e.into()),
        }
    };

    ratatui::restore();
    result
}
