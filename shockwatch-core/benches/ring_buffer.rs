//! Criterion benchmarks for the sampling hot path.
//!
//! Key metrics:
//! - Ring buffer write cost
//! - Chronological reconstruction at several capacities
//! - One full monitor cycle (acquire, detect, report)
//!
//! Run with: cargo bench --bench ring_buffer

use core::sync::atomic::AtomicBool;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shockwatch_core::{
    acquisition::Channel,
    buffer::{RingBuffer, Sample},
    constants::buffers::DEFAULT_CAPACITY,
    detector::AnomalyDetector,
    monitor::{Monitor, MonitorConfig},
    time::MockTicks,
    traits::{ChannelSource, LineSink},
};

struct AtRest;

impl ChannelSource for AtRest {
    type Error = ();

    fn read_channel(&mut self, channel: Channel) -> nb::Result<u16, ()> {
        Ok(match channel {
            Channel::X => 685,
            Channel::Y => 691,
            Channel::Z => 685,
        })
    }
}

struct Discard;

impl LineSink for Discard {
    fn write_line(&mut self, line: &str) {
        black_box(line);
    }
}

fn ring_buffer_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_buffer_write");
    group.throughput(Throughput::Elements(1));

    let mut rb = RingBuffer::<DEFAULT_CAPACITY>::new();
    let sample = Sample::new(1.0, 0.65);
    group.bench_function("write", |b| {
        b.iter(|| black_box(rb.write(black_box(sample))));
    });

    group.finish();
}

fn fill<const N: usize>() -> RingBuffer<N> {
    let mut rb = RingBuffer::<N>::new();
    // Leave the cursor mid-buffer so both halves get copied
    for i in 0..(N + N / 2) {
        rb.write(Sample::new(i as f32, 0.65));
    }
    rb
}

fn ring_buffer_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_buffer_reconstruct");

    let small = fill::<256>();
    group.throughput(Throughput::Elements(256));
    group.bench_with_input(BenchmarkId::new("chronological", 256), &small, |b, rb| {
        b.iter(|| black_box(rb.chronological()));
    });

    let large = fill::<DEFAULT_CAPACITY>();
    group.throughput(Throughput::Elements(DEFAULT_CAPACITY as u64));
    group.bench_with_input(
        BenchmarkId::new("chronological", DEFAULT_CAPACITY),
        &large,
        |b, rb| {
            b.iter(|| black_box(rb.chronological()));
        },
    );

    group.finish();
}

fn detector_update(c: &mut Criterion) {
    let mut detector = AnomalyDetector::default();
    let mut x = 0.0f32;
    c.bench_function("detector_update", |b| {
        b.iter(|| {
            x = if x > 2.0 { 0.9 } else { x + 0.01 };
            black_box(detector.update(black_box(x)))
        });
    });
}

fn monitor_cycle(c: &mut Criterion) {
    let ticks = MockTicks::new(0, 1 << 28);
    let mut monitor =
        match Monitor::<_, _, _, DEFAULT_CAPACITY>::new(AtRest, &ticks, Discard, MonitorConfig::default()) {
            Ok(monitor) => monitor,
            Err(e) => panic!("default config rejected: {e}"),
        };
    let stop = AtomicBool::new(false);

    c.bench_function("monitor_cycle", |b| {
        b.iter(|| {
            ticks.advance(52);
            black_box(monitor.run_for(1, &stop))
        });
    });
}

criterion_group!(
    benches,
    ring_buffer_write,
    ring_buffer_reconstruct,
    detector_update,
    monitor_cycle
);
criterion_main!(benches);
