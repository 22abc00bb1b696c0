//! Terminal output.
//!
//! A [`Terminal`] owns two buffers and a writer. Frames are diffed and
//! written in a single syscall so the screen never shows half a frame.

mod session;

pub use session::{Terminal, TerminalConfig};
