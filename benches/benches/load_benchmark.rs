//! End-to-end session load against replayed trades and the memory store.
//!
//! Run with: `cargo bench --package sessionbars-bench --bench load_benchmark`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sessionbars_bench::{bench_date, bench_symbol, synthetic_session};
use sessionbars_lib::{LoaderConfig, MemoryStore, ReplaySource, Scope, SessionLoader, SessionType};
use std::sync::Arc;

fn load_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create runtime");
    let scope = Scope::new("bench").expect("valid scope");
    let symbols = [bench_symbol()];
    let mut group = c.benchmark_group("load_session");
    group.sample_size(20);

    for page_size in [1_000, 50_000] {
        let trades = synthetic_session(100);
        group.throughput(Throughput::Elements(trades.len() as u64));
        let source = Arc::new(ReplaySource::new(page_size).with_trades(bench_symbol(), trades));

        group.bench_with_input(BenchmarkId::new("page_size", page_size), &source, |b, source| {
            b.to_async(&runtime).iter(|| {
                let loader = SessionLoader::new(
                    source.clone(),
                    Arc::new(MemoryStore::new()),
                    LoaderConfig::default(),
                );
                let scope = scope.clone();
                let symbols = symbols.clone();
                async move {
                    loader
                        .load_session(&scope, &symbols, bench_date(), SessionType::Regular, 1_000)
                        .await
                        .expect("valid session")
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, load_benchmark);
criterion_main!(benches);
