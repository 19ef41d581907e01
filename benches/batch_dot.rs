use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lanewise::simd::portable::f32x4::F32x4 as PortableF32x4;
use lanewise::{batch_dot_with, SimdBatchDot, Vector4, VectorBatch};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of vectors per batch. Each vector is 16 bytes, so the largest batch
/// (1 Mi vectors, 16 MiB) no longer fits in most L2 caches.
const BATCH_SIZES: &[usize] = &[64, 1024, 16 * 1024, 1024 * 1024];

fn generate_random_vectors(len: usize) -> Vec<Vector4> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len)
        .map(|_| Vector4::from([rng.random(), rng.random(), rng.random(), rng.random()]))
        .collect()
}

fn batch_dot_benchmarks(c: &mut Criterion) {
    let reference = Vector4::new(0.25, -1.0, 2.0, 0.5);

    for &size in BATCH_SIZES {
        let mut group = c.benchmark_group("BatchDot");
        group.throughput(Throughput::Elements(size as u64));

        let vectors = generate_random_vectors(size);
        let batch = VectorBatch::from_vectors(&vectors).unwrap();

        let rows: Vec<f32> = vectors.iter().flat_map(|v| v.to_array()).collect();
        let matrix = Array2::from_shape_vec((size, 4), rows).unwrap();
        let reference_arr = Array1::from_vec(reference.to_array().to_vec());

        group.bench_with_input(BenchmarkId::new("scalar", size), &batch, |b, batch| {
            b.iter(|| black_box(batch.scalar_dot(black_box(reference))))
        });

        group.bench_with_input(BenchmarkId::new("simd (lanewise)", size), &batch, |b, batch| {
            b.iter(|| black_box(batch.simd_dot(black_box(reference))))
        });

        group.bench_with_input(BenchmarkId::new("portable lanes", size), &batch, |b, batch| {
            let mut out = vec![0.0f32; batch.len()];
            b.iter(|| {
                batch_dot_with::<PortableF32x4>(black_box(reference), &batch.view(), &mut out)
                    .unwrap();
                black_box(&out);
            })
        });

        // Array-of-structures baseline: one dot product per row
        group.bench_with_input(BenchmarkId::new("ndarray (AoS)", size), &matrix, |b, m| {
            b.iter(|| black_box(m.dot(&reference_arr)))
        });

        group.finish();
    }
}

criterion_group!(benches, batch_dot_benchmarks);
criterion_main!(benches);
