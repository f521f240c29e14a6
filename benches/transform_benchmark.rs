use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use driver_etl::driver::{clean, RawDriverRow};
use rand::Rng;

// About one row in ten has a NULL, and most badges repeat
fn generate_rows(count: usize) -> Vec<RawDriverRow> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let id = rng.random_range(0..count / 2 + 1);
            RawDriverRow {
                chapa: (!rng.random_bool(0.05)).then(|| format!("{id:06}")),
                nome: (!rng.random_bool(0.05)).then(|| format!("Motorista {id}")),
            }
        })
        .collect()
}

fn bench_clean(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean");

    for size in [1_000usize, 10_000, 100_000] {
        let rows = generate_rows(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| clean(rows.clone()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_clean);
criterion_main!(benches);
