//! Benchmarks for statement splitting on large seed files.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use sqlseed_core::sql::{split_statements, strip_comments};

/// Rows mixing every scanner state: comments, both quote kinds, escapes.
fn build_file(rows: usize) -> String {
    let mut sql = String::new();
    for i in 0..rows {
        sql.push_str(&format!(
            "/* row {i} */ INSERT INTO \"leave;requests\" (id, reason) \
             VALUES ({i}, 'family; it''s urgent \\' -- not a comment'); -- trailing\n"
        ));
    }
    sql
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split/statements");

    for rows in [100, 1_000, 10_000] {
        let sql = build_file(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &sql, |b, sql| {
            b.iter(|| split_statements(sql));
        });
    }
    group.finish();
}

fn bench_strip_comments(c: &mut Criterion) {
    let sql = build_file(1_000);
    c.bench_function("split/strip_comments_1000_rows", |b| {
        b.iter(|| strip_comments(&sql));
    });
}

criterion_group!(benches, bench_split, bench_strip_comments);
criterion_main!(benches);
