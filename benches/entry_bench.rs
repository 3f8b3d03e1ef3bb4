use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tacozip::{create_multi, WriterConfig};

fn bench_create_multi(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_multi");

    for size in [64 * 1024usize, 1024 * 1024, 8 * 1024 * 1024] {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("payload.bin");
        std::fs::write(&src, vec![0xABu8; size]).unwrap();
        let out = dir.path().join("bench.zip");

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                create_multi(
                    &out,
                    &[&src],
                    &[b"payload.bin".as_slice()],
                    [0; 7],
                    [0; 7],
                    &WriterConfig::default(),
                )
                .unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_create_multi);
criterion_main!(benches);
