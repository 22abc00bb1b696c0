//! Widget trait.

use crate::buffer::Buffer;
use crate::layout::Rect;

/// A component that draws itself into a region of a buffer.
pub trait Widget {
    /// Current bounds.
    fn bounds(&self) -> Rect;

    /// Move or resize the widget.
    ///
    /// Called when the layout changes (e.g., terminal resize).
    fn set_bounds(&mut self, bounds: Rect);

    /// Draw into `buffer`, only within the widget's bounds.
    fn render(&self, buffer: &mut Buffer);

    /// Whether the widget changed since the last render.
    fn needs_redraw(&self) -> bool;

    /// Clear the redraw flag after rendering.
    fn clear_redraw(&mut self);
}
