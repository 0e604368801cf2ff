use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dlx::combinatorial::{
    random_rows, random_rows_with_cover, ExactCoverSearch, SparseMatrix,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_build(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(17);
    let rows = random_rows(&mut rng, 1000, 40, 0.2).unwrap();
    c.bench_function("build 1000x40", |b| {
        b.iter(|| SparseMatrix::new(black_box(&rows), 40).unwrap())
    });
}

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve random");
    for &density in &[0.1, 0.2, 0.3] {
        let mut rng = ChaCha20Rng::seed_from_u64(17);
        let rows = random_rows(&mut rng, 1000, 40, density).unwrap();
        let matrix = SparseMatrix::new(&rows, 40).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(density), &matrix, |b, m| {
            b.iter(|| {
                let mut search = ExactCoverSearch::new(m.clone());
                black_box(search.solve())
            })
        });
    }
    group.finish();
}

fn bench_planted(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve planted");
    for &cols in &[20, 40, 60] {
        let mut rng = ChaCha20Rng::seed_from_u64(29);
        let (rows, _) = random_rows_with_cover(&mut rng, 1000, cols, 0.1).unwrap();
        let matrix = SparseMatrix::new(&rows, cols).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(cols), &matrix, |b, m| {
            b.iter(|| {
                let mut search = ExactCoverSearch::new(m.clone());
                black_box(search.solve())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_random, bench_planted);
criterion_main!(benches);
