//! Layout: placing displays on the screen.
//!
//! Layouts are computed once per display set or terminal resize; rendering
//! only reads the resulting rectangles.
//!
//! ```text
//!  columns = 3
//!  ┌────────┐ ┌──────────────┐ ┌──────┐
//!  │ LH 123 │ │ FRANKFURT    │ │ GATE │   row height = tallest item
//!  └────────┘ └──────────────┘ └──────┘
//!  ┌────────┐ ┌──────────────┐ ┌──────┐
//!  │ BA 9   │ │ LONDON       │ │ BOAR │   column width = widest item
//!  └────────┘ └──────────────┘ └──────┘
//! ```

mod rect;

pub use rect::Rect;

/// Place items of the given sizes on a grid of `columns` columns.
///
/// Items fill rows left to right. Each column is as wide as its widest item
/// and each row as tall as its tallest item, so columns line up. Every
/// rectangle is clipped to `area`; items that fall outside are empty.
///
/// # Example
///
/// ```
/// use flapboard::layout::{grid, Rect};
///
/// let rects = grid(Rect::from_size(80, 24), &[(6, 3), (10, 3), (4, 3)], 2, 1);
/// assert_eq!(rects[1], Rect::new(7, 0, 10, 3));
/// assert_eq!(rects[2], Rect::new(0, 4, 4, 3));
/// ```
pub fn grid(area: Rect, sizes: &[(u16, u16)], columns: usize, gap: u16) -> Vec<Rect> {
    let columns = columns.max(1);

    let mut widths = vec![0u16; columns.min(sizes.len())];
    let mut heights = vec![0u16; sizes.len().div_ceil(columns)];
    for (index, (width, height)) in sizes.iter().enumerate() {
        let col = &mut widths[index % columns];
        *col = (*col).max(*width);
        let row = &mut heights[index / columns];
        *row = (*row).max(*height);
    }

    let column_x = offsets(area.x, &widths, gap);
    let row_y = offsets(area.y, &heights, gap);

    sizes
        .iter()
        .enumerate()
        .map(|(index, (width, height))| {
            let x = column_x[index % columns];
            let y = row_y[index / columns];
            Rect::new(x, y, *width, *height).intersection(&area)
        })
        .collect()
}

fn offsets(start: u16, extents: &[u16], gap: u16) -> Vec<u16> {
    extents
        .iter()
        .scan(start, |next, extent| {
            let at = *next;
            *next = next.saturating_add(*extent).saturating_add(gap);
            Some(at)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_column_stacks() {
        let rects = grid(Rect::from_size(40, 20), &[(5, 3), (8, 2)], 1, 1);
        assert_eq!(rects, [Rect::new(0, 0, 5, 3), Rect::new(0, 4, 8, 2)]);
    }

    #[test]
    fn test_columns_align() {
        let sizes = [(4, 3), (10, 3), (8, 3), (2, 3)];
        let rects = grid(Rect::new(1, 1, 60, 20), &sizes, 2, 2);
        assert_eq!(rects[0].x, rects[2].x);
        assert_eq!(rects[1].x, rects[3].x);
        assert_eq!(rects[1].x, 1 + 8 + 2);
        assert_eq!(rects[2].y, 1 + 3 + 2);
    }

    #[test]
    fn test_clipped_to_area() {
        let rects = grid(Rect::from_size(10, 4), &[(6, 3), (6, 3), (6, 3)], 2, 0);
        assert_eq!(rects[0], Rect::new(0, 0, 6, 3));
        assert_eq!(rects[1], Rect::new(6, 0, 4, 3));
        assert_eq!(rects[2], Rect::new(0, 3, 6, 1));
    }

    #[test]
    fn test_empty() {
        assert!(grid(Rect::from_size(10, 10), &[], 3, 1).is_empty());
    }

    #[test]
    fn test_zero_columns_means_one() {
        let rects = grid(Rect::from_size(10, 10), &[(1, 1), (1, 1)], 0, 0);
        assert_eq!(rects[1], Rect::new(0, 1, 1, 1));
    }
}
