//! Sequence benchmark: path building and frame materialization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flapboard::frame::materialize_frames;
use flapboard::{build_sequence, CharacterStack, Presets, BLANK};
use std::time::Duration;

fn sequence_alphanumeric(c: &mut Criterion) {
    let stack = CharacterStack::from_chars(Presets::ALPHANUM);
    let mut group = c.benchmark_group("build_sequence");

    // Short hop, longest wrap-around, and a symbol missing from the stack.
    for (name, from, to) in [("adjacent", "A", "B"), ("wrap", "B", "A"), ("missing", "A", "é")] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &(from, to), |b, (from, to)| {
            b.iter(|| build_sequence(black_box(&stack), from, to));
        });
    }
    group.finish();
}

fn sequence_words(c: &mut Criterion) {
    let stack = CharacterStack::from_words(["ON TIME", "DELAYED", "BOARDING", "CANCELLED"]);

    c.bench_function("build_sequence_words", |b| {
        b.iter(|| build_sequence(black_box(&stack), "ON TIME", "CANCELLED"));
    });
}

fn frames(c: &mut Criterion) {
    let stack = CharacterStack::from_chars(Presets::ALPHANUM);
    let mut path = vec![BLANK.to_string()];
    path.extend(build_sequence(&stack, BLANK, "9"));

    c.bench_function("materialize_frames_alphanum", |b| {
        b.iter(|| {
            materialize_frames(
                black_box(&path),
                Duration::from_millis(300),
                Duration::from_millis(16),
            )
        });
    });
}

criterion_group!(benches, sequence_alphanumeric, sequence_words, frames);
criterion_main!(benches);
