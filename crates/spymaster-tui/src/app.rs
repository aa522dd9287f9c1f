//! Interactive application - search box, chart and news tooltip.
//!
//! # Keys
//!
//! - Type a ticker, `Enter` to search
//! - `Backspace` edits the input
//! - `Esc`, `Ctrl-C`, or `q` on an empty input quits
//!
//! Moving the mouse over a news dot shows its tooltip.
//!
//! # Threading
//!
//! The event loop runs on a blocking thread. Each search is spawned on the
//! tokio runtime and reports back over a channel drained between frames:
//!
//! ```text
//! ┌──────────────┐  spawn(fetch)   ┌──────────────┐
//! │  event loop  │ ──────────────► │ tokio worker │
//! │  (blocking)  │ ◄────────────── │              │
//! └──────────────┘  (ticket, res)  └──────────────┘
//! ```

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use spymaster_core::{
    fetch_market_data, BackendError, Completion, FetchTicket, MarketData, PendingFetch,
    RenderState, StockBackend, ViewController,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::chart::{ChartConfig, ChartHandle, PointerMove};
use crate::tooltip::{self, NewsTooltip};

const FRAME_INTERVAL: Duration = Duration::from_millis(50);
const MAX_INPUT_LEN: usize = 16;

type FetchOutcome = (FetchTicket, Result<MarketData, BackendError>);

/// Pointer position currently over a bucket that has news.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hover {
    column: u16,
    row: u16,
    time: i64,
}

pub struct App {
    view: ViewController,
    chart: ChartHandle,
    pointer_events: mpsc::UnboundedReceiver<PointerMove>,
    hover: Option<Hover>,
    input: String,
    backend: StockBackend,
    include_news: bool,
    runtime: Handle,
    completions_tx: mpsc::UnboundedSender<FetchOutcome>,
    completions_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl App {
    pub fn new(backend: StockBackend, include_news: bool, runtime: Handle) -> Self {
        let mut chart = ChartHandle::create(Rect::default(), ChartConfig::default());
        let pointer_events = chart.subscribe_pointer_move();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            view: ViewController::new(),
            chart,
            pointer_events,
            hover: None,
            input: String::new(),
            backend,
            include_news,
            runtime,
            completions_tx,
            completions_rx,
        }
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    /// Submit `ticker` as if typed and confirmed.
    pub fn submit(&mut self, ticker: &str) {
        self.input = ticker.trim().to_owned();
        if let Some(pending) = self.view.submit(ticker) {
            self.spawn_fetch(pending);
        }
    }

    fn spawn_fetch(&self, pending: PendingFetch) {
        let backend = self.backend.clone();
        let include_news = self.include_news;
        let tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let outcome = fetch_market_data(&backend, &pending.symbol, include_news).await;
            if tx.send((pending.ticket, outcome)).is_err() {
                tracing::debug!(
                    ticket = pending.ticket.value(),
                    symbol = %pending.symbol,
                    "app closed before fetch finished"
                );
            }
        });
    }

    /// Run until the user quits.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let result = self.run_loop(terminal);
        self.chart.destroy();
        result
    }

    fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(FRAME_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    // Layout is recomputed every frame.
                    Event::Resize(..) => {}
                    _ => {}
                }
            }

            self.drain();
        }
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Esc => return true,
            KeyCode::Char('q') if self.input.is_empty() => return true,
            KeyCode::Enter => {
                let input = self.input.clone();
                self.submit(&input);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() && self.input.chars().count() < MAX_INPUT_LEN => {
                self.input.push(ch);
            }
            _ => {}
        }
        false
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            self.chart.pointer_moved(mouse.column, mouse.row);
        }
    }

    /// Apply finished fetches and pending pointer moves.
    pub fn drain(&mut self) {
        while let Ok((ticket, outcome)) = self.completions_rx.try_recv() {
            match self.view.complete(ticket, outcome) {
                Completion::Applied => {
                    if let Some(chart) = self.view.result() {
                        self.chart.show(chart);
                    }
                    self.hover = None;
                }
                // Already logged by the controller; the previous chart stays.
                Completion::Failed(_) | Completion::Stale => {}
            }
        }

        while let Ok(event) = self.pointer_events.try_recv() {
            self.hover = event
                .time
                .filter(|time| self.chart.news_at(*time).is_some())
                .map(|time| Hover {
                    column: event.column,
                    row: event.row,
                    time,
                });
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let [input_area, body] = Layout::vertical([Constraint::Length(3), Constraint::Min(0)])
        .areas(frame.area());

        let input = Paragraph::new(self.input.as_str()).block(
            Block::bordered().title(" Ticker · Enter to search · Esc to quit "),
        );
        frame.render_widget(input, input_area);
        let cursor_x = input_area.x + 1 + self.input.chars().count() as u16;
        frame.set_cursor_position(Position::new(
            cursor_x.min(input_area.right().saturating_sub(2)),
            input_area.y + 1,
        ));

        match self.view.render_state() {
            RenderState::Idle => {}
            RenderState::Loading => {
                let symbol = self
                    .view
                    .last_symbol()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                frame.render_widget(
                    Paragraph::new(format!("{symbol} is loading..."))
                        .style(Style::default().fg(Color::Gray)),
                    body,
                );
            }
            RenderState::Loaded(_) => {
                self.chart.resize(body);
                frame.render_widget(self.chart.widget(), self.chart.area());

                let news = self
                    .hover
                    .and_then(|hover| self.chart.news_at(hover.time).map(|news| (hover, news)));
                if let Some((hover, news)) = news {
                    let tooltip = NewsTooltip::new(news);
                    let area =
                        tooltip::placement(self.chart.area(), hover.column, hover.row, tooltip.height());
                    frame.render_widget(tooltip, area);
                }
            }
        }
    }
}
