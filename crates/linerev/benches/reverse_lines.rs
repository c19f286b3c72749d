//! Benchmark – `linerev::LineReverser`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use linerev::{GrowthMode, LineReverser, ReverseOptions};

/// Produce a deterministic input of `lines` lines, each `line_len` bytes of
/// payload followed by a newline.
fn make_payload(lines: usize, line_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(lines * (line_len + 1));
    for i in 0..lines {
        out.extend((0..line_len).map(|j| b'a' + ((i + j) % 26) as u8));
        out.push(b'\n');
    }
    out
}

fn run(input: &[u8], options: ReverseOptions) -> usize {
    let mut source = input;
    let mut sink = Vec::with_capacity(input.len());
    let mut reverser = LineReverser::new(options).expect("buffer");
    reverser.run(&mut source, &mut sink).expect("reverse");
    sink.len()
}

fn bench_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse_lines");
    group.measurement_time(Duration::from_secs(5));

    for &(lines, line_len) in &[(10_000, 16), (1_000, 1_024), (4, 1 << 20)] {
        let input = make_payload(lines, line_len);
        group.throughput(Throughput::Bytes(input.len() as u64));

        // Buffer sized to fit every line up front.
        let fitted = ReverseOptions {
            line_max: line_len,
            growth: GrowthMode::Bounded,
            ..Default::default()
        };
        group.bench_with_input(
            BenchmarkId::new("fitted", format!("{lines}x{line_len}")),
            &input,
            |b, input| b.iter(|| black_box(run(input, fitted))),
        );

        // Tiny starting buffer that has to grow into the longest line.
        let growing = ReverseOptions {
            line_max: 8,
            ..Default::default()
        };
        group.bench_with_input(
            BenchmarkId::new("growing", format!("{lines}x{line_len}")),
            &input,
            |b, input| b.iter(|| black_box(run(input, growing))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_reverse);
criterion_main!(benches);
