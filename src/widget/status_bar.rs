//! Status bar widget: one line with a left and a right section.
//!
//! The left section carries a title, the right one live statistics. When
//! the line is too narrow the right section gives way to the left.

use super::traits::Widget;
use crate::buffer::{Buffer, Cell, Rgb, Style};
use crate::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Colors of the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBarConfig {
    /// Background color.
    pub bg: Rgb,
    /// Left section text color.
    pub left_fg: Rgb,
    /// Right section text color.
    pub right_fg: Rgb,
}

impl Default for StatusBarConfig {
    fn default() -> Self {
        Self {
            bg: Rgb::new(40, 40, 40),
            left_fg: Rgb::WHITE,
            right_fg: Rgb::new(100, 200, 100),
        }
    }
}

/// A single-line status bar.
#[derive(Debug)]
pub struct StatusBar {
    /// Left section content.
    left: String,
    /// Right section content.
    right: String,
    /// Widget bounds.
    bounds: Rect,
    /// Configuration.
    config: StatusBarConfig,
    /// Needs redraw flag.
    dirty: bool,
}

impl StatusBar {
    /// Create a new status bar with the given bounds.
    pub fn new(bounds: Rect) -> Self {
        Self::with_config(bounds, StatusBarConfig::default())
    }

    /// Create a new status bar with custom colors.
    pub const fn with_config(bounds: Rect, config: StatusBarConfig) -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            bounds,
            config,
            dirty: true,
        }
    }

    /// Set the left section content.
    pub fn set_left(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.left {
            self.left = text;
            self.dirty = true;
        }
    }

    /// Set the right section content.
    pub fn set_right(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.right {
            self.right = text;
            self.dirty = true;
        }
    }

    /// Left section content.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Right section content.
    pub fn right(&self) -> &str {
        &self.right
    }
}

impl Widget for StatusBar {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
    }

    fn render(&self, buffer: &mut Buffer) {
        if self.bounds.is_empty() {
            return;
        }
        let Rect { x, y, width, .. } = self.bounds;
        let background = Style::new(self.config.left_fg, self.config.bg);

        buffer.fill(Rect::new(x, y, width, 1), Cell::new(" ").with_style(background));

        let used = buffer.set_str(x, y, &self.left, background, width);

        let right_width = u16::try_from(self.right.width()).unwrap_or(u16::MAX);
        // One column of air between the sections.
        if used.saturating_add(1).saturating_add(right_width) <= width {
            let style = Style::new(self.config.right_fg, self.config.bg);
            buffer.set_str(x + width - right_width, y, &self.right, style, right_width);
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

    fn rendered(bar: &StatusBar, width: u16) -> String {
        let mut buffer = Buffer::new(width, 1);
        bar.render(&mut buffer);
        buffer.row_text(0)
    }

    #[test]
    fn test_sections_aligned() {
        let mut bar = StatusBar::new(Rect::new(0, 0, 20, 1));
        bar.set_left("board");
        bar.set_right("3 moving");
        assert_eq!(rendered(&bar, 20), "board       3 moving");
    }

    #[test]
    fn test_right_dropped_when_narrow() {
        let mut bar = StatusBar::new(Rect::new(0, 0, 10, 1));
        bar.set_left("departures");
        bar.set_right("60 fps");
        assert_eq!(rendered(&bar, 10), "departures");
    }

    #[test]
    fn test_dirty_only_on_change() {
        let mut bar = StatusBar::new(Rect::new(0, 0, 10, 1));
        bar.set_left("a");
        bar.clear_redraw();
        bar.set_left("a");
        assert!(!bar.needs_redraw());
        bar.set_right("b");
        assert!(bar.needs_redraw());
    }

    #[test]
    fn test_colors() {
        let mut bar = StatusBar::new(Rect::new(0, 0, 6, 1));
        bar.set_right("ok");
        let mut buffer = Buffer::new(6, 1);
        bar.render(&mut buffer);
        let config = StatusBarConfig::default();
        assert_eq!(buffer.get(0, 0).unwrap().style().bg, config.bg);
        assert_eq!(buffer.get(5, 0).unwrap().style().fg, config.right_fg);
    }
}
