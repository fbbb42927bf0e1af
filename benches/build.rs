use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use merkle_tree::{Blake3, Bytes, MerkleTree, Sha256};

fn records(n: usize) -> Vec<Bytes> {
    (0..n).map(|i| Bytes::from(format!("record-{i}"))).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for n in [16, 1_000, 10_000] {
        let input = records(n);
        group.bench_with_input(BenchmarkId::new("blake3", n), &input, |b, input| {
            b.iter(|| MerkleTree::<_, Blake3>::build(black_box(input.clone())))
        });
        group.bench_with_input(BenchmarkId::new("sha256", n), &input, |b, input| {
            b.iter(|| MerkleTree::<_, Sha256>::build(black_box(input.clone())))
        });
    }
    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let tree = MerkleTree::new(records(10_000)).unwrap();
    let probe = Bytes::from("record-0");

    c.bench_function("verify_tree/10000", |b| b.iter(|| tree.verify_tree()));
    c.bench_function("verify_content/10000", |b| {
        b.iter(|| tree.verify_content(black_box(&probe)))
    });
    c.bench_function("proof/10000", |b| b.iter(|| tree.proof(black_box(&probe))));
}

criterion_group!(benches, bench_build, bench_verify);
criterion_main!(benches);
