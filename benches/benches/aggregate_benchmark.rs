//! Aggregation throughput over a full regular session.
//!
//! Run with: `cargo bench --package sessionbars-bench --bench aggregate_benchmark`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sessionbars_bench::synthetic_session;
use sessionbars_lib::{ExchangeCalendar, MinuteAggregator, aggregate};
use std::hint::black_box;

fn aggregate_benchmark(c: &mut Criterion) {
    let calendar = ExchangeCalendar::global();
    let mut group = c.benchmark_group("aggregate");

    for trades_per_minute in [1, 50, 500] {
        let trades = synthetic_session(trades_per_minute);
        group.throughput(Throughput::Elements(trades.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("sorted", trades_per_minute),
            &trades,
            |b, trades| b.iter(|| aggregate(black_box(trades), calendar)),
        );

        group.bench_with_input(
            BenchmarkId::new("streaming", trades_per_minute),
            &trades,
            |b, trades| {
                b.iter(|| {
                    let mut aggregator = MinuteAggregator::new(calendar);
                    for trade in black_box(trades) {
                        aggregator.process(trade);
                    }
                    aggregator.finish()
                });
            },
        );

        let mut reversed = trades.clone();
        reversed.reverse();
        group.bench_with_input(
            BenchmarkId::new("unsorted", trades_per_minute),
            &reversed,
            |b, trades| b.iter(|| aggregate(black_box(trades), calendar)),
        );
    }

    group.finish();
}

fn label_benchmark(c: &mut Criterion) {
    let calendar = ExchangeCalendar::global();
    let trades = synthetic_session(10);

    c.bench_function("label_for/session", |b| {
        b.iter(|| {
            for trade in &trades {
                black_box(calendar.label_for(trade.timestamp));
            }
        });
    });
}

criterion_group!(benches, aggregate_benchmark, label_benchmark);
criterion_main!(benches);
