//! Engine: the real-time host for a [`Board`].
//!
//! The engine takes over the terminal, spawns the input and ticker actors
//! and runs the main loop on the caller's thread:
//!
//! ```text
//!   tick ──▶ Board::advance_to(elapsed) ──▶ update callback
//!                                             │
//!          present ◀── render widgets ◀── sync from Board::view
//! ```
//!
//! The board is only ever touched from the main loop.

use super::input::InputActor;
use super::messages::InputEvent;
use super::ticker::{Tick, TickerActor};
use crate::board::{Board, DisplayId};
use crate::layout::{grid, Rect};
use crate::terminal::{Terminal, TerminalConfig};
use crate::widget::{FlapWidget, StatusBar, Widget};
use crossbeam_channel::{bounded, select, Receiver};
use std::io::{self, Stdout};
use std::time::Duration;

/// Configuration for the Engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Target frames per second.
    pub target_fps: u32,
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
    /// Displays per grid row.
    pub columns: usize,
    /// Columns and rows between displays.
    pub gap: u16,
    /// Text on the left of the status bar.
    pub title: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            input_poll_timeout: Duration::from_millis(10),
            alternate_screen: true,
            columns: 1,
            gap: 1,
            title: "flapboard".to_string(),
        }
    }
}

impl EngineConfig {
    /// Interval between ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }
}

/// What the update callback wants the loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the loop.
    Quit,
}

/// Drives a board in real time on the terminal.
#[derive(Debug)]
pub struct Engine {
    /// Configuration.
    config: EngineConfig,
    /// Screen.
    terminal: Terminal<Stdout>,
    /// Input event receiver.
    input_rx: Receiver<InputEvent>,
    /// Input actor handle.
    input_actor: Option<InputActor>,
    /// Ticker actor handle.
    ticker: Option<TickerActor>,
    /// One widget per mounted display, in mount order.
    widgets: Vec<FlapWidget>,
    /// Preferred widget sizes the current layout was computed for.
    sizes: Vec<(u16, u16)>,
    /// Bottom line.
    status: StatusBar,
    /// Layout must be recomputed.
    relayout: bool,
    /// Frames presented.
    frame_count: u64,
    /// Whether the engine is running.
    running: bool,
}

impl Engine {
    /// Create a new engine with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate screen, etc.).
    pub fn new() -> io::Result<Self> {
        Self::with_config(EngineConfig::default())
    }

    /// Create a new engine with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup or spawning an actor fails.
    pub fn with_config(config: EngineConfig) -> io::Result<Self> {
        let terminal = Terminal::stdout(TerminalConfig {
            alternate_screen: config.alternate_screen,
            ..TerminalConfig::default()
        })?;

        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let input_actor = InputActor::spawn(input_tx, config.input_poll_timeout)?;
        let ticker = TickerActor::spawn(config.frame_interval())?;

        let mut status = StatusBar::new(Rect::ZERO);
        status.set_left(config.title.clone());

        tracing::debug!(fps = config.target_fps, "engine started");

        Ok(Self {
            config,
            terminal,
            input_rx,
            input_actor: Some(input_actor),
            ticker: Some(ticker),
            widgets: Vec::new(),
            sizes: Vec::new(),
            status,
            relayout: true,
            frame_count: 0,
            running: true,
        })
    }

    /// Frames presented so far.
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check if the engine is still running.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the engine; [`run`](Self::run) returns after the current frame.
    pub const fn stop(&mut self) {
        self.running = false;
    }

    /// Run until the user quits or `update` returns [`Control::Quit`].
    ///
    /// Each tick advances the board to the tick time, calls `update` so the
    /// host can feed new values, and draws every display.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn run<F>(&mut self, board: &mut Board, mut update: F) -> io::Result<()>
    where
        F: FnMut(&mut Board, &Tick) -> Control,
    {
        let Some(ticks) = self.ticker.as_ref().map(|t| t.receiver().clone()) else {
            return Ok(());
        };
        let input = self.input_rx.clone();
        let origin = board.now();

        while self.running {
            select! {
                recv(input) -> event => match event {
                    Ok(event) => self.handle_input(&event),
                    Err(_) => self.running = false,
                },
                recv(ticks) -> tick => match tick {
                    Ok(tick) => {
                        board.advance_to(origin + tick.elapsed);
                        if update(board, &tick) == Control::Quit {
                            self.running = false;
                        }
                        self.draw(board)?;
                    }
                    Err(_) => self.running = false,
                },
            }
        }
        Ok(())
    }

    fn handle_input(&mut self, event: &InputEvent) {
        if event.is_quit() {
            self.running = false;
            return;
        }
        match event {
            InputEvent::Resize { width, height } => {
                tracing::debug!(width, height, "terminal resized");
                self.terminal.resize(*width, *height);
                self.relayout = true;
            }
            InputEvent::Error(message) => tracing::warn!(%message, "input error"),
            InputEvent::Key { .. } | InputEvent::Shutdown => {}
        }
    }

    /// Keep one widget per display, in mount order.
    fn sync_widgets(&mut self, board: &Board) {
        let ids: Vec<DisplayId> = board.displays().map(|(id, _)| id).collect();
        let current = self.widgets.iter().map(FlapWidget::display);
        if !current.eq(ids.iter().copied()) {
            self.widgets = ids.into_iter().map(FlapWidget::new).collect();
            self.relayout = true;
        }

        for widget in &mut self.widgets {
            widget.sync(board);
        }

        // A display whose digit count changed needs a new layout.
        let sizes: Vec<(u16, u16)> = self.widgets.iter().map(FlapWidget::preferred_size).collect();
        if sizes != self.sizes {
            self.sizes = sizes;
            self.relayout = true;
        }
    }

    fn layout(&mut self) {
        let (width, height) = (self.terminal.width(), self.terminal.height());
        let area = Rect::new(1, 1, width.saturating_sub(2), height.saturating_sub(3));
        let rects = grid(area, &self.sizes, self.config.columns, self.config.gap);

        for (widget, rect) in self.widgets.iter_mut().zip(rects) {
            widget.set_bounds(rect);
        }
        self.status
            .set_bounds(Rect::new(0, height.saturating_sub(1), width, 1));
        self.relayout = false;
    }

    fn draw(&mut self, board: &Board) -> io::Result<()> {
        self.sync_widgets(board);
        if self.relayout {
            self.layout();
        }

        let pending = board.timers().len();
        self.status.set_right(if board.is_animating() {
            format!("{pending} timers")
        } else {
            "idle".to_string()
        });

        let dirty = self.status.needs_redraw() || self.widgets.iter().any(Widget::needs_redraw);
        if !dirty {
            return Ok(());
        }

        let buffer = self.terminal.buffer_mut();
        buffer.clear();
        for widget in &mut self.widgets {
            widget.render(buffer);
            widget.clear_redraw();
        }
        self.status.render(buffer);
        self.status.clear_redraw();

        self.terminal.present()?;
        self.frame_count += 1;
        Ok(())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.join();
        }
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }
        tracing::debug!(frames = self.frame_count, "engine stopped");
    }
}
