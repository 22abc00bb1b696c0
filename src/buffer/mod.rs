//! Buffer module: the cell grid a board is drawn into.
//!
//! - [`Cell`]: one column holding a grapheme and its [`Style`]
//! - [`Buffer`]: a grid of cells
//! - [`diff`]: minimal terminal updates between two buffers

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;

pub use buffer::Buffer;
pub use cell::{Cell, CellFlags, Modifiers, Rgb, Style};
