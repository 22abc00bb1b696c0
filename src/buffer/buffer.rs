//! Buffer: a grid of cells the widgets draw a board into.
//!
//! Cells are stored in row-major order in one contiguous `Vec`.

use super::cell::{Cell, Style};
use crate::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;

/// A grid of cells representing the terminal screen.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
}

impl Buffer {
    /// Create a buffer of empty cells. Zero dimensions are raised to 1.
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            cells: vec![Cell::EMPTY; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The whole buffer as a rectangle.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// The underlying cells.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// The cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set the cell at (x, y). Returns `false` if out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        let Some(idx) = self.index_of(x, y) else {
            return false;
        };
        self.cells[idx] = cell;
        true
    }

    /// Draw `text` starting at (x, y), clipped to `max_width` columns.
    ///
    /// Wide graphemes take two columns; one that would straddle the clip
    /// edge is not drawn. Returns the number of columns used.
    pub fn set_str(&mut self, x: u16, y: u16, text: &str, style: Style, max_width: u16) -> u16 {
        let limit = x.saturating_add(max_width).min(self.width);
        let mut col = x;

        for grapheme in text.graphemes(true) {
            let cell = Cell::new(grapheme).with_style(style);
            let width = u16::from(cell.width());
            if col.saturating_add(width) > limit {
                break;
            }
            self.set(col, y, cell);
            if width == 2 {
                self.set(col + 1, y, Cell::wide_continuation(style));
            }
            col += width;
        }
        col - x
    }

    /// Fill a rectangle with a cell, clipped to the buffer.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let right = rect.right().min(self.width);
        let bottom = rect.bottom().min(self.height);
        for row in rect.y..bottom {
            for col in rect.x..right {
                self.set(col, row, cell);
            }
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize, keeping the overlapping top-left content.
    pub fn resize(&mut self, width: u16, height: u16) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return;
        }

        let mut cells = vec![Cell::EMPTY; usize::from(width) * usize::from(height)];
        let keep = usize::from(self.width.min(width));
        for row in 0..usize::from(self.height.min(height)) {
            let old = row * usize::from(self.width);
            let new = row * usize::from(width);
            cells[new..new + keep].copy_from_slice(&self.cells[old..old + keep]);
        }

        self.cells = cells;
        self.width = width;
        self.height = height;
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width))
    }

    /// The text of row `y`, continuations skipped.
    pub fn row_text(&self, y: u16) -> String {
        self.rows()
            .nth(usize::from(y))
            .map(|row| row.iter().map(Cell::symbol).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Rgb;

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new(80, 24);
        assert_eq!((buffer.width(), buffer.height()), (80, 24));
        assert_eq!(buffer.cells().len(), 80 * 24);
    }

    #[test]
    fn test_zero_size_is_raised() {
        let buffer = Buffer::new(0, 0);
        assert_eq!((buffer.width(), buffer.height()), (1, 1));
    }

    #[test]
    fn test_bounds() {
        let mut buffer = Buffer::new(10, 4);
        assert!(buffer.get(9, 3).is_some());
        assert!(buffer.get(10, 3).is_none());
        assert!(!buffer.set(0, 4, Cell::new("X")));
        assert_eq!(buffer.index_of(5, 2), Some(25));
    }

    #[test]
    fn test_set_str() {
        let mut buffer = Buffer::new(10, 1);
        let used = buffer.set_str(1, 0, "GATE", Style::default(), 10);
        assert_eq!(used, 4);
        assert_eq!(buffer.row_text(0), " GATE     ");
    }

    #[test]
    fn test_set_str_clips() {
        let mut buffer = Buffer::new(10, 1);
        assert_eq!(buffer.set_str(0, 0, "DEPARTURES", Style::default(), 3), 3);
        assert_eq!(buffer.row_text(0), "DEP       ");
        assert_eq!(buffer.set_str(8, 0, "XYZ", Style::default(), 10), 2);
    }

    #[test]
    fn test_wide_grapheme() {
        let mut buffer = Buffer::new(4, 1);
        assert_eq!(buffer.set_str(0, 0, "日本", Style::default(), 4), 4);
        assert!(buffer.get(1, 0).unwrap().is_wide_continuation());
        assert_eq!(buffer.row_text(0), "日本");

        // No room for the second half.
        let mut buffer = Buffer::new(3, 1);
        assert_eq!(buffer.set_str(0, 0, "日本", Style::default(), 3), 2);
    }

    #[test]
    fn test_fill_clips() {
        let mut buffer = Buffer::new(5, 3);
        let style = Style::new(Rgb::BLACK, Rgb::FLAP);
        buffer.fill(Rect::new(3, 1, 10, 10), Cell::new("#").with_style(style));
        assert_eq!(buffer.row_text(0), "     ");
        assert_eq!(buffer.row_text(1), "   ##");
        assert_eq!(buffer.get(4, 2).unwrap().style(), style);
    }

    #[test]
    fn test_clear() {
        let mut buffer = Buffer::new(5, 1);
        buffer.set_str(0, 0, "ABC", Style::default(), 5);
        buffer.clear();
        assert_eq!(buffer, Buffer::new(5, 1));
    }

    #[test]
    fn test_resize_keeps_content() {
        let mut buffer = Buffer::new(4, 2);
        buffer.set_str(0, 1, "AB", Style::default(), 4);
        buffer.resize(6, 3);
        assert_eq!(buffer.row_text(1), "AB    ");
        buffer.resize(1, 2);
        assert_eq!(buffer.row_text(1), "A");
        assert!(buffer.get(1, 1).is_none());
    }
}
