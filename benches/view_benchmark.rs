//! Benchmarks for view derivation and report grouping.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use trackboard::model::Record;
use trackboard::pipeline::{derive_view, FilterState, SortKey, SortState};
use trackboard::reports::group_for_report;

const OWNERS: [&str; 5] = ["Ana", "Bruno", "Carla", "Diego", "Elisa"];
const STATUSES: [&str; 4] = ["active", "waiting", "completed", "blocked"];

fn records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let mut r = Record::new(i as i64);
            r.owner = Some(OWNERS[i % OWNERS.len()].to_string());
            r.status = Some(STATUSES[i % STATUSES.len()].to_string());
            r.department = Some(format!("Dept {}", i % 7));
            r.project = Some(format!("Project {i}"));
            r.entry_date = Some(format!("2024-{:02}-{:02}T10:00:00", i % 12 + 1, i % 28 + 1));
            r
        })
        .collect()
}

fn benchmark_derive_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_view");
    for size in [1_000, 10_000] {
        let data = records(size);
        let mut filter = FilterState::new();
        filter.toggle_owner("Ana");
        filter.toggle_owner("Carla");
        filter.toggle_status("PENDING");
        let sort = SortState::NONE.activate(SortKey::Project);

        group.bench_with_input(BenchmarkId::new("filtered_sorted", size), &data, |b, data| {
            b.iter(|| black_box(derive_view(data, &filter, sort).len()));
        });
        group.bench_with_input(BenchmarkId::new("status_sort", size), &data, |b, data| {
            let sort = SortState::NONE.activate(SortKey::Status);
            b.iter(|| black_box(derive_view(data, &FilterState::new(), sort).len()));
        });
    }
    group.finish();
}

fn benchmark_grouping(c: &mut Criterion) {
    let data = records(10_000);
    let view: Vec<&Record> = data.iter().collect();
    c.bench_function("group_for_report_10k", |b| {
        b.iter(|| black_box(group_for_report(&view).len()));
    });
}

criterion_group!(benches, benchmark_derive_view, benchmark_grouping);
criterion_main!(benches);
