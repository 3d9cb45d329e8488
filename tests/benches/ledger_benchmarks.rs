//! # Account Ledger Benchmarks
//!
//! | Operation | Path | Target |
//! |-----------|------|--------|
//! | add | row lock + read + write | < 10μs in memory |
//! | subtract | row lock + check + write | < 10μs in memory |
//! | settle_holds | full scan, one store batch per chunk of held accounts | linear in accounts |
//! | contended subtract | many tasks on one row | no lock registry growth |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hb_01_account_ledger::{AccountLedgerApi, AccountLedgerService, InMemoryKVStore};
use shared_types::{AccountId, NewAccount};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("tokio runtime")
}

fn id(i: usize) -> AccountId {
    AccountId::new(format!("bench-{i}")).expect("non-empty id")
}

fn ledger_with(rt: &Runtime, accounts: usize, balance: u64) -> Arc<AccountLedgerService<InMemoryKVStore>> {
    let ledger = Arc::new(AccountLedgerService::new_in_memory());
    rt.block_on(async {
        for i in 0..accounts {
            ledger
                .open_account(NewAccount::active(id(i), "bench", balance))
                .await
                .expect("open account");
        }
    });
    ledger
}

fn bench_single_row(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("hb-01-single-row");
    group.measurement_time(Duration::from_secs(5));

    let target = &id(0);

    let credited = &ledger_with(&rt, 1, 0);
    group.bench_function("add", |b| {
        b.to_async(&rt)
            .iter(|| async move { black_box(credited.add(target, 1).await.is_ok()) })
    });

    let reserved = &ledger_with(&rt, 1, u64::MAX);
    group.bench_function("subtract", |b| {
        b.to_async(&rt)
            .iter(|| async move { black_box(reserved.subtract(target, 1).await.is_ok()) })
    });

    group.bench_function("status", |b| {
        b.to_async(&rt)
            .iter(|| async move { black_box(reserved.status(target).await.is_ok()) })
    });

    group.finish();
}

fn bench_settlement(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("hb-01-settlement");
    group.sample_size(20);

    for accounts in [100usize, 1_000, 10_000] {
        let ledger = ledger_with(&rt, accounts, 1_000_000);

        group.throughput(Throughput::Elements(accounts as u64));
        group.bench_with_input(BenchmarkId::new("settle_holds", accounts), &accounts, |b, &n| {
            b.iter_batched(
                || {
                    rt.block_on(async {
                        for i in 0..n {
                            ledger.subtract(&id(i), 1).await.expect("reserve");
                        }
                    })
                },
                |_| rt.block_on(async { black_box(ledger.settle_holds().await.expect("settle")) }),
                criterion::BatchSize::PerIteration,
            )
        });
    }

    group.finish();
}

fn bench_contended_subtract(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("hb-01-contention");
    group.sample_size(20);

    for tasks in [8usize, 64] {
        let ledger = ledger_with(&rt, 1, u64::MAX);

        group.throughput(Throughput::Elements(tasks as u64));
        group.bench_with_input(BenchmarkId::new("subtract_one_row", tasks), &tasks, |b, &n| {
            b.to_async(&rt).iter(|| {
                let ledger = Arc::clone(&ledger);
                async move {
                    let handles: Vec<_> = (0..n)
                        .map(|_| {
                            let ledger = Arc::clone(&ledger);
                            tokio::spawn(async move { ledger.subtract(&id(0), 1).await.is_ok() })
                        })
                        .collect();
                    for handle in handles {
                        black_box(handle.await.expect("task"));
                    }
                }
            })
        });

        assert_eq!(ledger.active_rows(), 0);
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_row,
    bench_settlement,
    bench_contended_subtract
);
criterion_main!(benches);
