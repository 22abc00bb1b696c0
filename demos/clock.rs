//! Clock Demo: a wall clock whose digits flip every second.
//!
//! Run with `cargo run --example clock`; set `RUST_LOG=flapboard=debug` and
//! redirect stderr to a file to watch the animation log.

use flapboard::{Board, Control, DisplayConfig, Engine, EngineConfig};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

/// Current UTC time as `HH:MM:SS`.
fn now_hms() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs());
    let day = secs % 86_400;
    format!("{:02}:{:02}:{:02}", day / 3600, day / 60 % 60, day % 60)
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut board = Board::new();
    let mut shown = now_hms();
    let clock = board.mount(
        DisplayConfig::new(shown.clone())
            .with_chars("0123456789:")
            .with_timing(Duration::from_millis(200)),
    );
    let seconds = board.mount(
        DisplayConfig::new("0")
            .with_length(6)
            .with_timing(Duration::from_millis(120)),
    );

    let mut engine = Engine::with_config(EngineConfig {
        title: "clock (UTC)  q to quit".to_string(),
        ..EngineConfig::default()
    })?;

    engine.run(&mut board, |board, tick| {
        let now = now_hms();
        if now != shown {
            board.set_value(clock, &now);
            board.set_value(seconds, &tick.elapsed.as_secs().to_string());
            shown = now;
        }
        Control::Continue
    })
}
