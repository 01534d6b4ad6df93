use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use getrandom::fill;
use nodelock_vault::cipher;
use nodelock_vault::prelude::*;

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");
    group.sample_size(10);

    for log_n in [10u8, 14] {
        let kdf = Kdf::new(log_n, 8, 1).unwrap();
        group.bench_with_input(BenchmarkId::new("scrypt", log_n), &kdf, |b, kdf| {
            b.iter(|| kdf.derive(b"bench-secret", b"0123456789abcdef").unwrap());
        });
    }

    group.finish();
}

fn bench_seal_open(c: &mut Criterion) {
    let mut group = c.benchmark_group("seal_open");
    let key = Kdf::new(10, 8, 1).unwrap().derive(b"bench-secret", b"0123456789abcdef").unwrap();

    let sizes = [("32B", 32usize), ("4KB", 4 * 1024), ("64KB", 64 * 1024)];

    for (label, size) in sizes {
        let mut data = vec![0u8; size];
        fill(&mut data).expect("System RNG unavailable for benchmark data");

        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("seal", label), &data, |b, d| {
            b.iter(|| cipher::seal(&key, d).unwrap());
        });

        let sealed = cipher::seal(&key, &data).expect("seal failed");

        group.bench_with_input(BenchmarkId::new("open", label), &sealed, |b, s| {
            b.iter(|| cipher::open(&key, &s.nonce, &s.ciphertext).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_derive, bench_seal_open);
criterion_main!(benches);
