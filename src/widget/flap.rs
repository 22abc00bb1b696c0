//! Flap widget: draws one display as a row of split-flap tiles.
//!
//! ```text
//!   hinge = true          hinge = false
//!   ┌───┐ ┌───┐           ┌───┐ ┌───┐
//!   │ 1 │ │ 2 │  top      │ 1 │ │ 2 │
//!   │───│ │───│  hinge    │ 1 │ │ 2 │
//!   │ 1 │ │ 2 │  bottom   └───┘ └───┘
//!   └───┘ └───┘
//! ```
//!
//! A tile is its symbol padded by one column on each side. While a flap is
//! moving, the half it covers is drawn in the `moving` style.

use super::traits::Widget;
use crate::board::{Board, DisplayId};
use crate::buffer::{Buffer, Cell, Modifiers, Rgb, Style};
use crate::display::DisplayView;
use crate::frame::FlapHalf;
use crate::layout::Rect;
use crate::stack::StackMode;
use unicode_width::UnicodeWidthStr;

/// Colors used to draw tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileStyle {
    /// Resting halves.
    pub face: Style,
    /// The half a moving flap covers.
    pub moving: Style,
    /// Hinge line.
    pub hinge: Style,
}

impl Default for TileStyle {
    fn default() -> Self {
        Self {
            face: Style::new(Rgb::FLAP, Rgb::HOUSING).with_modifiers(Modifiers::BOLD),
            moving: Style::new(Rgb::FLAP, Rgb::HOUSING).with_modifiers(Modifiers::DIM),
            hinge: Style::new(Rgb::HINGE, Rgb::HOUSING),
        }
    }
}

/// Draws a mounted display.
#[derive(Debug)]
pub struct FlapWidget {
    /// Display shown.
    display: DisplayId,
    /// Widget bounds.
    bounds: Rect,
    /// Latest snapshot of the display.
    view: Option<DisplayView>,
    /// Tile colors.
    style: TileStyle,
    /// Needs redraw flag.
    dirty: bool,
}

impl FlapWidget {
    /// Columns between two tiles.
    pub const GAP: u16 = 1;
    /// Glyph used for the hinge line.
    pub const HINGE: &'static str = "─";

    /// Create a widget for `display`; call [`sync`](Self::sync) before rendering.
    pub fn new(display: DisplayId) -> Self {
        Self {
            display,
            bounds: Rect::ZERO,
            view: None,
            style: TileStyle::default(),
            dirty: true,
        }
    }

    /// Set the tile colors (builder pattern).
    #[must_use]
    pub const fn with_style(mut self, style: TileStyle) -> Self {
        self.style = style;
        self
    }

    /// Display shown.
    #[inline]
    pub const fn display(&self) -> DisplayId {
        self.display
    }

    /// Latest snapshot.
    #[inline]
    pub const fn view(&self) -> Option<&DisplayView> {
        self.view.as_ref()
    }

    /// Pull the display's current faces from the board.
    ///
    /// Returns `true` if anything visible changed.
    pub fn sync(&mut self, board: &Board) -> bool {
        let view = board.view(self.display);
        if view == self.view {
            return false;
        }
        self.view = view;
        self.dirty = true;
        true
    }

    /// Size needed to show every tile: (columns, rows).
    pub fn preferred_size(&self) -> (u16, u16) {
        let Some(view) = &self.view else {
            return (0, 0);
        };
        let tiles = u16::try_from(view.faces.len()).unwrap_or(u16::MAX);
        if tiles == 0 {
            return (0, 0);
        }
        let width = tiles
            .saturating_mul(Self::tile_columns(view))
            .saturating_add((tiles - 1).saturating_mul(Self::GAP));
        (width, Self::tile_rows(view))
    }

    #[inline]
    const fn tile_columns(view: &DisplayView) -> u16 {
        view.tile_width.saturating_add(2)
    }

    #[inline]
    const fn tile_rows(view: &DisplayView) -> u16 {
        if view.hinge {
            3
        } else {
            2
        }
    }

    fn draw_half(&self, buffer: &mut Buffer, tile: Rect, y: u16, symbol: &str, style: Style, mode: StackMode) {
        if y >= self.bounds.bottom() {
            return;
        }
        let clip = self.bounds.right().saturating_sub(tile.x);
        buffer.fill(
            Rect::new(tile.x, y, tile.width.min(clip), 1),
            Cell::new(" ").with_style(style),
        );

        let inner = tile.width.saturating_sub(2);
        let symbol_width = u16::try_from(symbol.width()).unwrap_or(u16::MAX).min(inner);
        let offset = match mode {
            StackMode::Words => 0,
            StackMode::Numeric | StackMode::Alphanumeric => (inner - symbol_width) / 2,
        };
        let x = tile.x + 1 + offset;
        buffer.set_str(x, y, symbol, style, inner.saturating_sub(offset).min(clip.saturating_sub(1 + offset)));
    }
}

impl Widget for FlapWidget {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
    }

    fn render(&self, buffer: &mut Buffer) {
        let Some(view) = &self.view else {
            return;
        };
        if self.bounds.is_empty() {
            return;
        }

        let columns = Self::tile_columns(view);
        let rows = Self::tile_rows(view);
        let mut x = self.bounds.x;

        for face in &view.faces {
            if x >= self.bounds.right() {
                break;
            }
            let tile = Rect::new(x, self.bounds.y, columns, rows);

            let top_style = match face.moving {
                Some(FlapHalf::Top) => self.style.moving,
                _ => self.style.face,
            };
            let bottom_style = match face.moving {
                Some(FlapHalf::Bottom) => self.style.moving,
                _ => self.style.face,
            };

            self.draw_half(buffer, tile, tile.y, &face.top, top_style, view.mode);
            if view.hinge && tile.y + 1 < self.bounds.bottom() {
                let line = Self::HINGE.repeat(usize::from(columns));
                let clip = self.bounds.right() - x;
                buffer.set_str(x, tile.y + 1, &line, self.style.hinge, columns.min(clip));
            }
            self.draw_half(buffer, tile, tile.y + rows - 1, &face.bottom, bottom_style, view.mode);

            x = x.saturating_add(columns).saturating_add(Self::GAP);
        }
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayConfig;
    use crate::stack::Presets;
    use std::time::Duration;

    fn rendered(widget: &mut FlapWidget, board: &Board) -> Buffer {
        widget.sync(board);
        let (width, height) = widget.preferred_size();
        widget.set_bounds(Rect::from_size(width, height));
        let mut buffer = Buffer::new(width, height);
        widget.render(&mut buffer);
        buffer
    }

    #[test]
    fn test_static_tiles() {
        let mut board = Board::new();
        let id = board.mount(DisplayConfig::new("12"));
        let mut widget = FlapWidget::new(id);

        let buffer = rendered(&mut widget, &board);
        assert_eq!(widget.preferred_size(), (7, 3));
        assert_eq!(buffer.row_text(0), " 1   2 ");
        assert_eq!(buffer.row_text(1), "─── ───");
        assert_eq!(buffer.row_text(2), " 1   2 ");
        assert_eq!(buffer.get(1, 0).unwrap().style(), TileStyle::default().face);
    }

    #[test]
    fn test_without_hinge() {
        let mut board = Board::new();
        let id = board.mount(DisplayConfig::new("7").with_hinge(false));
        let mut widget = FlapWidget::new(id);

        let buffer = rendered(&mut widget, &board);
        assert_eq!(widget.preferred_size(), (3, 2));
        assert_eq!(buffer.row_text(0), " 7 ");
        assert_eq!(buffer.row_text(1), " 7 ");
    }

    #[test]
    fn test_moving_top_flap() {
        let mut board = Board::new();
        let id = board.mount(
            DisplayConfig::new("A")
                .with_chars(Presets::ALPHANUM)
                .with_timing(Duration::from_millis(120)),
        );
        board.set_value(id, "B");
        board.advance(Duration::from_millis(10));

        let mut widget = FlapWidget::new(id);
        let buffer = rendered(&mut widget, &board);
        assert_eq!(buffer.row_text(0), " A ");
        assert_eq!(buffer.row_text(2), " A ");
        assert_eq!(buffer.get(1, 0).unwrap().style(), TileStyle::default().moving);
        assert_eq!(buffer.get(1, 2).unwrap().style(), TileStyle::default().face);

        // Past the hinge the bottom flap lands with the new symbol.
        board.advance(Duration::from_millis(40));
        let buffer = rendered(&mut widget, &board);
        assert_eq!(buffer.row_text(0), " B ");
        assert_eq!(buffer.row_text(2), " B ");
        assert_eq!(buffer.get(1, 0).unwrap().style(), TileStyle::default().face);
        assert_eq!(buffer.get(1, 2).unwrap().style(), TileStyle::default().moving);
    }

    #[test]
    fn test_word_tiles_share_width() {
        let mut board = Board::new();
        let id = board.mount(DisplayConfig::new("LATE").with_words(["ON TIME", "LATE"]));
        let mut widget = FlapWidget::new(id);

        let buffer = rendered(&mut widget, &board);
        assert_eq!(widget.preferred_size(), (9, 3));
        assert_eq!(buffer.row_text(0), " LATE    ");
    }

    #[test]
    fn test_sync_reports_changes() {
        let mut board = Board::new();
        let id = board.mount(DisplayConfig::new("1").with_timing(Duration::from_millis(40)));
        let mut widget = FlapWidget::new(id);
        assert!(widget.sync(&board));
        widget.clear_redraw();
        assert!(!widget.sync(&board));
        assert!(!widget.needs_redraw());

        board.set_value(id, "2");
        board.advance(Duration::from_millis(1));
        assert!(widget.sync(&board));
        assert!(widget.needs_redraw());
    }

    #[test]
    fn test_clipped_to_bounds() {
        let mut board = Board::new();
        let id = board.mount(DisplayConfig::new("123"));
        let mut widget = FlapWidget::new(id);
        widget.sync(&board);
        widget.set_bounds(Rect::new(0, 0, 5, 2));

        let mut buffer = Buffer::new(10, 4);
        widget.render(&mut buffer);
        assert_eq!(buffer.row_text(0), " 1        ");
        assert_eq!(buffer.row_text(1), "─── ─     ");
        assert_eq!(buffer.row_text(2), "          ");
    }

    #[test]
    fn test_unmounted_display_draws_nothing() {
        let mut board = Board::new();
        let id = board.mount(DisplayConfig::new("1"));
        board.unmount(id);
        let mut widget = FlapWidget::new(id);
        widget.sync(&board);
        assert_eq!(widget.preferred_size(), (0, 0));
    }
}
