//! Terminal session: double-buffered presentation to a writer.
//!
//! Widgets draw into the `next` buffer; [`Terminal::present`] diffs it
//! against what is on screen, flushes the commands in a single write and
//! swaps the buffers.

use crate::buffer::diff::{render_diff, render_full, DiffResult, DiffState};
use crate::buffer::Buffer;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use crossterm::style::{Attribute, SetAttribute};
use std::io::{self, Stdout, Write};

/// Terminal setup options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Switch to the alternate screen buffer.
    pub alternate_screen: bool,
    /// Bytes reserved for one frame of output.
    pub output_capacity: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            output_capacity: 4096,
        }
    }
}

/// A double-buffered terminal.
pub struct Terminal<W: Write> {
    /// Destination of the escape sequences.
    out: W,
    /// What is on screen.
    current: Buffer,
    /// What the next frame shows.
    next: Buffer,
    /// Cursor and style as left by the last frame.
    state: DiffState,
    /// Frame output, flushed in one write.
    output: Vec<u8>,
    /// The next present repaints everything.
    needs_full: bool,
    /// Set when raw mode was entered and must be left on drop.
    session: Option<TerminalConfig>,
}

impl Terminal<Stdout> {
    /// Take over stdout: raw mode, hidden cursor, optionally the alternate
    /// screen. Everything is restored on drop.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be read or the mode
    /// switch fails.
    pub fn stdout(config: TerminalConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        terminal::enable_raw_mode()?;

        let mut out = io::stdout();
        if config.alternate_screen {
            execute!(out, EnterAlternateScreen)?;
        }
        execute!(out, cursor::Hide)?;

        let mut term = Self::with_writer(out, width, height);
        term.output.reserve(config.output_capacity);
        term.session = Some(config);
        tracing::debug!(width, height, "terminal session started");
        Ok(term)
    }
}

impl<W: Write> Terminal<W> {
    /// Present to an arbitrary writer; no terminal mode is touched.
    pub fn with_writer(out: W, width: u16, height: u16) -> Self {
        Self {
            out,
            current: Buffer::new(width, height),
            next: Buffer::new(width, height),
            state: DiffState::new(),
            output: Vec::new(),
            needs_full: true,
            session: None,
        }
    }

    /// Screen width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.next.width()
    }

    /// Screen height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.next.height()
    }

    /// The buffer the next frame is drawn into.
    #[inline]
    pub const fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.next
    }

    /// The writer.
    #[inline]
    pub const fn writer(&self) -> &W {
        &self.out
    }

    /// Adapt to a new screen size. The next present repaints everything.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.next.resize(width, height);
        self.current = Buffer::new(width, height);
        self.needs_full = true;
    }

    /// Repaint everything on the next present.
    pub const fn invalidate(&mut self) {
        self.needs_full = true;
    }

    /// Write the difference between the screen and the next buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn present(&mut self) -> io::Result<DiffResult> {
        self.output.clear();

        let result = if self.needs_full {
            self.state.reset();
            queue!(self.output, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
            render_full(&self.next, &mut self.output, &mut self.state)?
        } else {
            render_diff(&self.current, &self.next, &mut self.output, &mut self.state)?
        };

        if !self.output.is_empty() {
            self.out.write_all(&self.output)?;
            self.out.flush()?;
        }

        self.current.clone_from(&self.next);
        self.needs_full = false;
        tracing::trace!(
            cells = result.cells_changed,
            bytes = self.output.len(),
            "frame presented"
        );
        Ok(result)
    }

    fn restore(&mut self, config: TerminalConfig) -> io::Result<()> {
        execute!(self.out, SetAttribute(Attribute::Reset), cursor::Show)?;
        if config.alternate_screen {
            execute!(self.out, LeaveAlternateScreen)?;
        }
        terminal::disable_raw_mode()
    }
}

impl<W: Write> std::fmt::Debug for Terminal<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminal")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("raw", &self.session.is_some())
            .finish_non_exhaustive()
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        if let Some(config) = self.session.take() {
            if let Err(err) = self.restore(config) {
                tracing::warn!(%err, "failed to restore terminal");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Style;

    #[test]
    fn test_first_present_repaints() {
        let mut term = Terminal::with_writer(Vec::new(), 4, 2);
        let result = term.present().unwrap();
        assert_eq!(result.cells_changed, 8);
        assert!(String::from_utf8_lossy(term.writer()).contains("\x1b[2J"));
    }

    #[test]
    fn test_unchanged_frame_writes_nothing() {
        let mut term = Terminal::with_writer(Vec::new(), 4, 2);
        term.present().unwrap();
        let written = term.writer().len();

        let result = term.present().unwrap();
        assert_eq!(result.cells_changed, 0);
        assert_eq!(term.writer().len(), written);
    }

    #[test]
    fn test_only_changes_written() {
        let mut term = Terminal::with_writer(Vec::new(), 4, 2);
        term.present().unwrap();

        term.buffer_mut().set_str(1, 1, "ok", Style::default(), 4);
        let result = term.present().unwrap();
        assert_eq!(result.cells_changed, 2);
        assert_eq!(result.cursor_moves, 1);
    }

    #[test]
    fn test_resize_repaints() {
        let mut term = Terminal::with_writer(Vec::new(), 4, 2);
        term.present().unwrap();
        term.resize(3, 3);
        assert_eq!((term.width(), term.height()), (3, 3));
        assert_eq!(term.present().unwrap().cells_changed, 9);
    }
}
