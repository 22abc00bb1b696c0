//! Widgets: components that draw board state into a [`Buffer`](crate::buffer::Buffer).
//!
//! Widgets never touch the board's clock. The host syncs them from
//! [`Board::view`](crate::board::Board::view) after advancing time, then
//! renders every widget that reports a change.

mod flap;
mod status_bar;
mod traits;

pub use flap::{FlapWidget, TileStyle};
pub use status_bar::{StatusBar, StatusBarConfig};
pub use traits::Widget;
