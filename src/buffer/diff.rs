//! Diffing: turn the difference between two buffers into terminal commands.
//!
//! Only cells that changed are written. The diff state remembers where the
//! cursor is and which style was last emitted, so adjacent cells with the
//! same style cost one grapheme each. Commands are queued on the writer;
//! the caller flushes once per frame.

use super::{Buffer, Cell, Modifiers, Rgb, Style};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use std::io::{self, Write};

/// Terminal state as last left by the diffing engine.
#[derive(Debug, Clone, Default)]
pub struct DiffState {
    /// Cursor position, if known.
    cursor: Option<(u16, u16)>,
    /// Last emitted style, if known.
    style: Option<Style>,
}

impl DiffState {
    /// Create a state with unknown cursor and style.
    pub const fn new() -> Self {
        Self {
            cursor: None,
            style: None,
        }
    }

    /// Forget everything (after a clear or an external write).
    pub const fn reset(&mut self) {
        self.cursor = None;
        self.style = None;
    }
}

/// Statistics of one diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Cells written.
    pub cells_changed: usize,
    /// Cursor moves emitted.
    pub cursor_moves: usize,
    /// Style changes emitted.
    pub style_changes: usize,
}

/// Queue the commands turning `current` into `next`.
///
/// Both buffers must have the same size; a size mismatch falls back to
/// [`render_full`].
pub fn render_diff<W: Write>(
    current: &Buffer,
    next: &Buffer,
    out: &mut W,
    state: &mut DiffState,
) -> io::Result<DiffResult> {
    if current.width() != next.width() || current.height() != next.height() {
        return render_full(next, out, state);
    }

    let mut result = DiffResult::default();
    let width = usize::from(next.width());

    for (idx, (old, new)) in current.cells().iter().zip(next.cells()).enumerate() {
        if old == new || new.is_wide_continuation() {
            continue;
        }
        let x = u16::try_from(idx % width).unwrap_or(u16::MAX);
        let y = u16::try_from(idx / width).unwrap_or(u16::MAX);
        emit_cell(out, x, y, new, state, &mut result)?;
    }

    Ok(result)
}

/// Queue every cell of `buffer`, ignoring what is on screen.
pub fn render_full<W: Write>(
    buffer: &Buffer,
    out: &mut W,
    state: &mut DiffState,
) -> io::Result<DiffResult> {
    let mut result = DiffResult::default();
    for (y, row) in (0u16..).zip(buffer.rows()) {
        for (x, cell) in (0u16..).zip(row) {
            if !cell.is_wide_continuation() {
                emit_cell(out, x, y, cell, state, &mut result)?;
            }
        }
    }
    Ok(result)
}

fn emit_cell<W: Write>(
    out: &mut W,
    x: u16,
    y: u16,
    cell: &Cell,
    state: &mut DiffState,
    result: &mut DiffResult,
) -> io::Result<()> {
    result.cells_changed += 1;

    if state.cursor != Some((x, y)) {
        queue!(out, MoveTo(x, y))?;
        result.cursor_moves += 1;
    }

    let style = cell.style();
    if state.style != Some(style) {
        emit_style(out, style, state.style)?;
        state.style = Some(style);
        result.style_changes += 1;
    }

    queue!(out, Print(cell.symbol()))?;
    state.cursor = Some((x.saturating_add(u16::from(cell.width().max(1))), y));
    Ok(())
}

/// Queue the commands switching from `previous` to `style`.
///
/// Removing a modifier needs a full attribute reset, which also clears the
/// colors, so both colors are re-emitted after one.
fn emit_style<W: Write>(out: &mut W, style: Style, previous: Option<Style>) -> io::Result<()> {
    let reset =
        previous.is_none_or(|prev| !prev.modifiers.difference(style.modifiers).is_empty());
    let (added, prev_fg, prev_bg) = match previous {
        Some(prev) if !reset => (
            style.modifiers.difference(prev.modifiers),
            Some(prev.fg),
            Some(prev.bg),
        ),
        _ => (style.modifiers, None, None),
    };

    if reset {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    if prev_fg != Some(style.fg) {
        queue!(out, SetForegroundColor(color(style.fg)))?;
    }
    if prev_bg != Some(style.bg) {
        queue!(out, SetBackgroundColor(color(style.bg)))?;
    }
    for (flag, attribute) in [
        (Modifiers::BOLD, Attribute::Bold),
        (Modifiers::DIM, Attribute::Dim),
        (Modifiers::UNDERLINE, Attribute::Underlined),
        (Modifiers::REVERSED, Attribute::Reverse),
    ] {
        if added.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

#[inline]
const fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
