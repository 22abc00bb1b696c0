//! Scheduler benchmark: start-delay throughput and board-wide updates.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flapboard::{
    BatchScheduler, Board, DisplayConfig, Presets, SchedulerConfig, StaggerScheduler, Timers,
};
use std::time::Duration;

fn start_delays(c: &mut Criterion) {
    c.bench_function("batch_scheduler_1000_starts", |b| {
        b.iter(|| {
            let mut timers = Timers::new();
            let mut scheduler = BatchScheduler::new(SchedulerConfig {
                batch_size: 20,
                batch_delay: Duration::from_millis(16),
                reset_after: Duration::from_secs(1),
            });
            let mut last = Duration::ZERO;
            for _ in 0..1000 {
                last = scheduler.digit_start_delay(&mut timers);
            }
            scheduler.dispose(&mut timers);
            black_box(last)
        });
    });
}

fn board_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_update");

    for displays in [10usize, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(displays), &displays, |b, &displays| {
            b.iter(|| {
                let mut board = Board::with_stagger(SchedulerConfig::default());
                let ids: Vec<_> = (0..displays)
                    .map(|_| {
                        board.mount(
                            DisplayConfig::new("AAAAAAAA")
                                .with_chars(Presets::ALPHANUM)
                                .with_length(8),
                        )
                    })
                    .collect();
                for id in &ids {
                    board.set_value(*id, "ZZZZZZZZ");
                }
                // Run every animation to completion.
                while let Some(deadline) = board.next_deadline() {
                    board.advance_to(deadline);
                }
                black_box(board.now())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, start_delays, board_update);
criterion_main!(benches);
