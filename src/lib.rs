//! # Flapboard
//!
//! Split-flap display animation for the terminal.
//!
//! Every character position of a display ("digit") flips forward through
//! an ordered, wrapping stack of symbols until it reaches the requested
//! one, like the mechanical boards of old railway stations.
//!
//! ## Core Concepts
//!
//! - **Character stacks**: ordered cyclic alphabets or word lists; flaps only
//!   move forward, so the stack order decides every transition
//! - **Frames**: each step is two half-rotations (top flap falls, bottom flap
//!   lands); the settling step is slower
//! - **Stagger scheduling**: a board hands out start delays in batches so
//!   large boards ripple instead of flipping at once
//! - **Virtual time**: a [`Board`] owns a timer queue; the host advances its
//!   clock, so the engine is deterministic and testable without sleeping
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use flapboard::{Board, DisplayConfig};
//!
//! let mut board = Board::new();
//! let id = board.mount(DisplayConfig::new("12").with_timing(Duration::from_millis(100)));
//!
//! board.set_value(id, "34");
//! assert!(board.is_animating());
//!
//! board.advance(Duration::from_secs(1));
//! assert!(!board.is_animating());
//! assert_eq!(board.display(id).unwrap().value(), "34");
//! ```
//!
//! The [`actor::Engine`] drives a board in real time on the terminal.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod board;
pub mod buffer;
pub mod config;
pub mod digit;
pub mod display;
pub mod frame;
pub mod layout;
pub mod scheduler;
pub mod stack;
pub mod terminal;
pub mod timer;
pub mod widget;

// Re-exports for convenience
pub use actor::{Control, Engine, EngineConfig, Tick};
pub use board::{Board, DisplayId, TimerTarget, Timers};
pub use buffer::{Buffer, Cell, Modifiers, Rgb, Style};
pub use config::{BoardConfig, ConfigError};
pub use digit::{DigitAnimation, DigitId};
pub use display::{DisplayConfig, DisplayView, FlapDisplay, PadMode, TileFace};
pub use frame::{FlapFace, FlapHalf, Frame};
pub use layout::Rect;
pub use scheduler::{BatchScheduler, NoopScheduler, SchedulerConfig, StaggerScheduler};
pub use stack::{build_sequence, CharacterStack, MissingSymbolPolicy, Presets, StackMode, BLANK};
pub use timer::{TimerId, TimerQueue};
pub use widget::{FlapWidget, StatusBar, Widget};
