// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive shell (ratatui + crossterm): the iceberg on the left, the
//! explanation panel beside it, or overlaying it on narrow terminals. Fetches
//! requested by the controller are handed to the caller through a spawn
//! callback and completions are drained from an mpsc channel each tick, so
//! this loop never blocks on the network.

use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

mod html;
#[cfg(test)]
mod tests;
mod theme;

use crate::model::{Chart, Entry, Layer};
use crate::panel::{
    ExplanationView, FetchOutcome, FetchRequest, PanelConfig, PanelController, PanelSurface,
};
use theme::TuiTheme;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Terminal columns below which the panel overlays the chart instead of
/// sharing the width with it.
pub const NARROW_TERMINAL_COLS: u16 = 110;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const LOADING_CAPTION: &str = "Fetching explanation…";
const ERROR_LABEL: &str = "Failed to load explanation:";
const IDLE_HINT: &str = "Select an entry to fetch its explanation.";

/// Runs the interactive terminal UI until the user quits.
///
/// `spawn_fetch` is invoked for every fetch the controller requests; the
/// completions must arrive on `outcomes`.
pub fn run_with_chart(
    chart: Chart,
    config: PanelConfig,
    outcomes: Receiver<FetchOutcome>,
    mut spawn_fetch: impl FnMut(FetchRequest),
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(chart, config);

    while !app.should_quit {
        loop {
            match outcomes.try_recv() {
                Ok(outcome) => app.apply_fetch_outcome(outcome),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                    if let Some(request) = app.take_fetch_request() {
                        spawn_fetch(request);
                    }
                }
                _ => {}
            }
        } else {
            app.tick();
        }
    }

    Ok(())
}

/// Built-in chart for `--demo`.
pub fn demo_chart() -> Chart {
    Chart::new(
        "Internet Mysteries",
        vec![
            Layer::new(
                "The Surface",
                vec![Entry::new("Rickrolling"), Entry::new("Numbers stations")],
            ),
            Layer::new(
                "Below the Waterline",
                vec![
                    Entry::new("Cicada 3301"),
                    Entry::new("The Wow! signal"),
                    Entry::new("Webdriver Torso"),
                ],
            ),
            Layer::new(
                "The Depths",
                vec![
                    Entry::new("Markovian Parallax Denigrate"),
                    Entry::new("A858"),
                ],
            ),
            Layer::new("The Abyss", vec![Entry::new("The Bloop")]),
        ],
    )
}

/// Panel display state owned by the TUI and mutated through [`PanelSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PanelDisplay {
    Idle,
    Loading,
    Loaded(ExplanationView),
    Error(String),
}

#[derive(Debug)]
pub(crate) struct TuiPanel {
    viewport_width: u16,
    open: bool,
    title: Option<String>,
    display: PanelDisplay,
}

impl TuiPanel {
    fn new() -> Self {
        Self {
            viewport_width: 0,
            open: false,
            title: None,
            display: PanelDisplay::Idle,
        }
    }
}

impl PanelSurface for TuiPanel {
    fn viewport_width(&self) -> u16 {
        self.viewport_width
    }

    fn set_panel_open(&mut self, open: bool) {
        self.open = open;
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_owned());
    }

    fn show_loading(&mut self) {
        self.display = PanelDisplay::Loading;
    }

    fn show_loaded(&mut self, view: &ExplanationView) {
        self.display = PanelDisplay::Loaded(view.clone());
    }

    fn show_error(&mut self, message: &str) {
        self.display = PanelDisplay::Error(message.to_owned());
    }
}

pub(crate) struct App {
    chart: Chart,
    controller: PanelController<TuiPanel>,
    // Flattened (layer, entry) pairs backing the cursor.
    entry_rows: Vec<(usize, usize)>,
    cursor: usize,
    pending_fetch: Option<FetchRequest>,
    spinner_frame: usize,
    should_quit: bool,
    theme: TuiTheme,
}

impl App {
    pub(crate) fn new(chart: Chart, config: PanelConfig) -> Self {
        let entry_rows = flatten_entries(&chart);
        Self {
            chart,
            controller: PanelController::new(config, TuiPanel::new()),
            entry_rows,
            cursor: 0,
            pending_fetch: None,
            spinner_frame: 0,
            should_quit: false,
            theme: TuiTheme,
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.controller.close_panel(),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Enter | KeyCode::Char(' ') => self.select_under_cursor(),
            KeyCode::Char('r') => {
                if let Some(request) = self.controller.refresh_current() {
                    self.pending_fetch = Some(request);
                }
            }
            _ => {}
        }
    }

    /// Deferred fetch handoff, drained by the run loop after each key.
    pub(crate) fn take_fetch_request(&mut self) -> Option<FetchRequest> {
        self.pending_fetch.take()
    }

    pub(crate) fn apply_fetch_outcome(&mut self, outcome: FetchOutcome) {
        self.controller.apply_outcome(outcome);
    }

    fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    fn set_viewport_width(&mut self, width: u16) {
        self.controller.surface_mut().viewport_width = width;
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.entry_rows.is_empty() {
            return;
        }
        let last = self.entry_rows.len() - 1;
        self.cursor = self
            .cursor
            .saturating_add_signed(delta)
            .min(last);
    }

    fn entry_at_cursor(&self) -> Option<&Entry> {
        let (layer_idx, entry_idx) = *self.entry_rows.get(self.cursor)?;
        self.chart
            .layers()
            .get(layer_idx)
            .and_then(|layer| layer.entries().get(entry_idx))
    }

    fn select_under_cursor(&mut self) {
        let Some(text) = self.entry_at_cursor().map(|entry| entry.text().to_owned()) else {
            return;
        };
        if let Some(request) = self.controller.select_entry(&text) {
            self.pending_fetch = Some(request);
        }
    }

    fn is_narrow(&self) -> bool {
        self.controller.surface().viewport_width < self.controller.config().narrow_breakpoint
    }
}

fn flatten_entries(chart: &Chart) -> Vec<(usize, usize)> {
    let mut rows = Vec::with_capacity(chart.entry_count());
    for (layer_idx, layer) in chart.layers().iter().enumerate() {
        for entry_idx in 0..layer.entries().len() {
            rows.push((layer_idx, entry_idx));
        }
    }
    rows
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    app.set_viewport_width(area.width);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let footer_area = layout[1];

    if app.is_narrow() {
        draw_iceberg(frame, main_area, app);
        if app.controller.surface().open {
            frame.render_widget(Clear, main_area);
            draw_panel(frame, main_area, app);
        }
    } else {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(main_area);
        draw_iceberg(frame, panes[0], app);
        draw_panel(frame, panes[1], app);
    }

    frame.render_widget(footer_line(app), footer_area);
}

fn draw_iceberg(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let layer_count = app.chart.layers().len();
    let mut items: Vec<ListItem<'_>> = Vec::new();
    let mut selected_item = None;
    let mut row = 0usize;

    for (layer_idx, layer) in app.chart.layers().iter().enumerate() {
        let layer_style = app.theme.layer_style(layer_idx, layer_count);
        items.push(ListItem::new(Line::styled(
            format!(" {} ", layer.name()),
            layer_style.add_modifier(Modifier::BOLD),
        )));
        for entry in layer.entries() {
            let style = if row == app.cursor {
                layer_style.patch(app.theme.selection_style())
            } else {
                layer_style
            };
            items.push(ListItem::new(Line::styled(
                format!("   • {}", entry.text()),
                style,
            )));
            if row == app.cursor {
                selected_item = Some(items.len() - 1);
            }
            row += 1;
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.chart.name()));
    let list = List::new(items).block(block);
    let mut state = ListState::default();
    state.select(selected_item);
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_panel(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let surface = app.controller.surface();
    let title = surface.title.as_deref().unwrap_or("Explanation");
    let focused = !matches!(surface.display, PanelDisplay::Idle);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border_style(focused))
        .title(format!(" {title} "));

    let text = panel_text(app);
    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn panel_text(app: &App) -> Text<'static> {
    match &app.controller.surface().display {
        PanelDisplay::Idle => Text::from(Line::styled(IDLE_HINT, app.theme.hint_style())),
        PanelDisplay::Loading => Text::from(Line::styled(
            format!("{} {LOADING_CAPTION}", SPINNER_FRAMES[app.spinner_frame]),
            app.theme.loading_style(),
        )),
        PanelDisplay::Loaded(view) => loaded_text(app, view),
        PanelDisplay::Error(message) => Text::from(Line::styled(
            format!("{ERROR_LABEL} {message}"),
            app.theme.error_style(),
        )),
    }
}

fn loaded_text(app: &App, view: &ExplanationView) -> Text<'static> {
    let mut lines = Vec::new();
    let image_label = if view.image().is_placeholder() {
        "Image (placeholder): "
    } else {
        "Image: "
    };
    lines.push(Line::from(vec![
        Span::styled(image_label, app.theme.hint_style()),
        Span::styled(view.image().url().to_owned(), app.theme.image_line_style()),
    ]));
    lines.push(Line::default());
    for text_line in html::fragment_to_lines(view.body_html()) {
        lines.push(Line::from(text_line));
    }
    Text::from(lines)
}

fn footer_line(app: &App) -> Paragraph<'static> {
    let key = app.theme.footer_key_style();
    let label = app.theme.footer_label_style();
    let mut spans = vec![
        Span::styled("↑/↓", key),
        Span::styled(" move · ", label),
        Span::styled("⏎", key),
        Span::styled(" explain · ", label),
    ];
    if matches!(app.controller.surface().display, PanelDisplay::Loaded(_)) {
        spans.push(Span::styled("r", key));
        spans.push(Span::styled(" refresh · ", label));
    }
    if app.is_narrow() && app.controller.surface().open {
        spans.push(Span::styled("esc", key));
        spans.push(Span::styled(" close · ", label));
    }
    spans.push(Span::styled("q", key));
    spans.push(Span::styled(" quit", label));
    Paragraph::new(Line::from(spans))
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}
