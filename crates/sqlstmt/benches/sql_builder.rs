use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlstmt::qb::{ParamStore, compile};
use sqlstmt::{Condition, SelectQuery, Statement, Value};

/// SELECT col0, col1, ... FROM t WHERE (col0 = :p_1 AND col1 = :p_2 ...)
fn build_select(n: usize) -> SelectQuery {
    let columns: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let conditions = (0..n).map(|i| Condition::eq(format!("col{i}"), i as i64));
    sqlstmt::select()
        .columns(columns)
        .from("t")
        .where_(Condition::and(conditions))
}

/// Alternating AND/OR groups nested `depth` levels deep.
fn nested_tree(depth: usize) -> Condition {
    let mut node = Condition::eq("leaf", 0);
    for level in 0..depth {
        let children = [Condition::gt(format!("c{level}"), level as i64), node];
        node = if level % 2 == 0 {
            Condition::or(children)
        } else {
            Condition::and(children)
        };
    }
    node
}

fn bench_compile_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/compile_nested");

    for depth in [1, 5, 10, 50] {
        let tree = nested_tree(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &tree, |b, tree| {
            b.iter(|| {
                let mut store = ParamStore::new();
                black_box(compile(tree, &mut store, true))
            });
        });
    }

    group.finish();
}

fn bench_build_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_select");

    for n in [1, 5, 10, 50, 100] {
        let query = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| black_box(query.build()));
        });
    }

    group.finish();
}

fn bench_cached_sql(c: &mut Criterion) {
    let mut query = build_select(50);
    c.bench_function("sql_builder/cached_sql", |b| {
        b.iter(|| black_box(query.sql().map(str::len)));
    });
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let query = sqlstmt::select()
                    .from("t")
                    .where_(Condition::in_list("id", values.clone()));
                black_box(query.build())
            });
        });
    }

    group.finish();
}

fn bench_insert_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/insert_rows");

    for n in [1, 10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let query = sqlstmt::insert("t").values((0..n).map(|i| {
                    vec![("id", Value::from(i)), ("name", Value::from(format!("n{i}")))]
                }));
                black_box(query.build())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compile_nested,
    bench_build_select,
    bench_cached_sql,
    bench_in_list,
    bench_insert_rows
);
criterion_main!(benches);
