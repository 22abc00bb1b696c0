//! Actors: threads feeding the real-time host.
//!
//! - **Input Actor**: polls terminal events, forwards them to the main loop
//! - **Ticker Actor**: sends frame ticks carrying elapsed time
//! - **Main Loop** ([`Engine::run`]): owns the board, advances its clock and
//!   renders
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ──────────────────▶ │              │
//! └──────────────┘                     │  Main Loop   │ ──▶ Board
//! ┌──────────────┐        Tick         │              │ ──▶ Terminal
//! │Ticker Thread │ ──────────────────▶ │              │
//! └──────────────┘                     └──────────────┘
//! ```

mod engine;
mod input;
mod messages;
mod ticker;

pub use engine::{Control, Engine, EngineConfig};
pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyModifiers};
pub use ticker::{Tick, TickerActor};
