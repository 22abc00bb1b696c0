//! Departures Demo: an airport board with word-mode status columns.
//!
//! The board layout comes from `demos/departures.toml`, or from the TOML
//! file given as the first argument. Every few seconds a random row
//! changes its status.

use flapboard::{Board, BoardConfig, Control, DisplayId, Engine, EngineConfig, StackMode};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const STATUSES: [&str; 5] = ["ON TIME", "BOARDING", "DELAYED", "GATE CLOSED", "CANCELLED"];
const INTERVAL: Duration = Duration::from_secs(3);

/// Xorshift; good enough to pick rows.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        let len = u64::try_from(items.len()).unwrap_or(1);
        items[usize::try_from(self.next() % len).unwrap_or(0)]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => BoardConfig::from_path(path)?,
        None => BoardConfig::from_toml_str(include_str!("departures.toml"))?,
    };
    let mut board = Board::from_config(&config);

    let statuses: Vec<DisplayId> = board
        .displays()
        .filter(|(_, display)| display.mode() == StackMode::Words)
        .map(|(id, _)| id)
        .collect();

    let mut engine = Engine::with_config(EngineConfig {
        columns: 3,
        gap: 2,
        title: "departures  q to quit".to_string(),
        ..EngineConfig::default()
    })?;

    let mut rng = Rng(0x2545_f491_4f6c_dd1d);
    let mut next_change = INTERVAL;

    engine.run(&mut board, |board, tick| {
        if tick.elapsed >= next_change && !statuses.is_empty() {
            board.set_value(rng.pick(&statuses), rng.pick(&STATUSES));
            next_change = tick.elapsed + INTERVAL;
        }
        Control::Continue
    })?;
    Ok(())
}
