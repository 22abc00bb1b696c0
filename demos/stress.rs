//! Stress Demo: many displays updated at once under a stagger scheduler.
//!
//! Thirty eight-digit displays receive new random values every two
//! seconds. The batch scheduler starts at most twenty digits per 20ms, so
//! the change ripples across the board.

use flapboard::{
    Board, Control, DisplayConfig, DisplayId, Engine, EngineConfig, Presets, SchedulerConfig,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DISPLAYS: usize = 30;
const LENGTH: usize = 8;
const INTERVAL: Duration = Duration::from_secs(2);

/// Xorshift value generator.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn value(&mut self) -> String {
        let symbols = Presets::ALPHANUM.as_bytes();
        let len = u64::try_from(symbols.len()).unwrap_or(1);
        (0..LENGTH)
            .map(|_| char::from(symbols[usize::try_from(self.next() % len).unwrap_or(0)]))
            .collect()
    }
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut board = Board::with_stagger(SchedulerConfig {
        batch_size: 20,
        batch_delay: Duration::from_millis(20),
        ..SchedulerConfig::default()
    });
    let mut rng = Rng(0x9e37_79b9_7f4a_7c15);

    let ids: Vec<DisplayId> = (0..DISPLAYS)
        .map(|_| {
            board.mount(
                DisplayConfig::new(rng.value())
                    .with_chars(Presets::ALPHANUM)
                    .with_length(LENGTH)
                    .with_timing(Duration::from_millis(150))
                    .with_hinge(false),
            )
        })
        .collect();

    let mut engine = Engine::with_config(EngineConfig {
        columns: 5,
        title: format!("stress: {DISPLAYS} displays  q to quit"),
        ..EngineConfig::default()
    })?;

    let mut next_change = INTERVAL;
    engine.run(&mut board, |board, tick| {
        if tick.elapsed >= next_change {
            for id in &ids {
                board.set_value(*id, &rng.value());
            }
            next_change = tick.elapsed + INTERVAL;
        }
        Control::Continue
    })
}
