use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use permnet::{BenesNetwork, PermutationMap};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::hint::black_box;

fn bench_build(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let mut group = c.benchmark_group("build");
    for n in [1 << 8, 1 << 12, 1 << 16] {
        let perm = PermutationMap::random(n, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(n), &perm, |b, perm| {
            b.iter(|| BenesNetwork::for_permutation(black_box(perm)))
        });
    }
    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let mut group = c.benchmark_group("apply");
    for n in [1 << 8, 1 << 12, 1 << 16] {
        let perm = PermutationMap::random(n, &mut rng);
        let network = BenesNetwork::for_permutation(&perm);
        let input: Vec<u64> = (0..n as u64).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &network, |b, network| {
            b.iter(|| network.apply(black_box(input.clone())).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_apply);
criterion_main!(benches);
