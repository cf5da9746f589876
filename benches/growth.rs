use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use dynarr::DynArray;
use smallvec::SmallVec;



pub fn benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Growth");
    group.sample_size(1000);

    group.bench_function(
        BenchmarkId::new("DynArray", "push-spare"),
        |b| b.iter_batched_ref(
            || DynArray::<u8>::with_capacity(17),
            |arr| black_box({ arr.push(black_box(128)); }),
            BatchSize::SmallInput
        )
    );

    group.bench_function(
        BenchmarkId::new("DynArray", "push-full"),
        |b| b.iter_batched_ref(
            || DynArray::<u8>::from([1; 16]),
            |arr| black_box({ arr.push(black_box(128)); }),
            BatchSize::SmallInput
        )
    );

    group.bench_function(
        BenchmarkId::new("Vec", "push-full"),
        |b| b.iter_batched_ref(
            || { let mut vec = Vec::<u8>::with_capacity(16); vec.extend([1; 16]); vec },
            |vec| black_box({ vec.push(black_box(128)); }),
            BatchSize::SmallInput
        )
    );

    group.bench_function(
        BenchmarkId::new("SmallVec", "push-spill"),
        |b| b.iter_batched_ref(
            || SmallVec::<[u8; 16]>::from_buf([1; 16]),
            |vec| black_box({ vec.push(black_box(128)); }),
            BatchSize::SmallInput
        )
    );

    group.bench_function(
        BenchmarkId::new("DynArray", "fill-1024-from-1"),
        |b| b.iter(|| {
            let mut arr = DynArray::<u32>::with_capacity(1);
            for i in 0..1024 { arr.push(black_box(i)); }
            black_box(arr)
        })
    );

    group.bench_function(
        BenchmarkId::new("DynArray", "clone-256"),
        |b| b.iter_batched_ref(
            || (0..256).map(|i| i.to_string()).collect::<DynArray<String>>(),
            |arr| black_box(arr.clone()),
            BatchSize::SmallInput
        )
    );

    group.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
