//! Ticker Actor: Dedicated thread for generating timing events.
//!
//! Ticks carry the time elapsed since the ticker started, which the host
//! feeds to [`Board::advance_to`](crate::board::Board::advance_to). The
//! channel holds two ticks; a slow receiver skips frames instead of
//! falling behind.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A tick event sent at regular intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Frame number (monotonically increasing).
    pub frame: u64,
    /// Time elapsed since the ticker was started.
    pub elapsed: Duration,
}

/// Ticker actor that generates regular timing events.
#[derive(Debug)]
pub struct TickerActor {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Receiver for tick events.
    tick_rx: Receiver<Tick>,
}

impl TickerActor {
    /// Spawn a ticker firing every `interval` (16ms for ~60 FPS).
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the ticker thread.
    pub fn spawn(interval: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = Arc::clone(&shutdown);
        let (tick_tx, tick_rx) = bounded(2);

        let handle = thread::Builder::new()
            .name("flapboard-ticker".to_string())
            .spawn(move || Self::run_loop(&tick_tx, &shutdown_clone, interval))?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            tick_rx,
        })
    }

    /// The tick receiver, for use with `select!`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Signal the ticker to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the ticker thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(tick_tx: &Sender<Tick>, shutdown: &AtomicBool, interval: Duration) {
        let start = Instant::now();
        let mut frame = 0u64;
        let mut next_tick = start + interval;

        while !shutdown.load(Ordering::Relaxed) {
            let now = Instant::now();
            if now < next_tick {
                thread::sleep((next_tick - now).min(Duration::from_millis(1)));
                continue;
            }

            // A full channel means the receiver is slow: drop the tick.
            let _ = tick_tx.try_send(Tick {
                frame,
                elapsed: now - start,
            });

            frame += 1;
            next_tick += interval;
            if next_tick < now {
                next_tick = now + interval;
            }
        }
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_basic() {
        let ticker = TickerActor::spawn(Duration::from_millis(10)).unwrap();

        let first = ticker.receiver().recv_timeout(Duration::from_millis(200)).unwrap();
        assert_eq!(first.frame, 0);

        let second = ticker.receiver().recv_timeout(Duration::from_millis(200)).unwrap();
        assert!(second.elapsed > first.elapsed);

        ticker.join();
    }

    #[test]
    fn test_ticker_shutdown() {
        let ticker = TickerActor::spawn(Duration::from_millis(100)).unwrap();
        ticker.shutdown();
        thread::sleep(Duration::from_millis(20));
        ticker.join();
    }
}
