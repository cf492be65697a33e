//! Generation benchmarks for levelgen_core.
//!
//! Run with: `cargo bench -p levelgen_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use levelgen_core::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_config(algorithm: Algorithm) -> GenerationConfig {
    GenerationConfig::default()
        .with_size(64, 64)
        .with_algorithm(algorithm)
        .with_seed(42)
}

/// Benchmarks each generation algorithm at a 64x64 grid.
pub fn generation_benchmark(c: &mut Criterion) {
    let generator = LevelGenerator::new();
    let scenario = ScenarioInput::for_genre("fantasy");

    for algorithm in Algorithm::ALL {
        c.bench_function(&format!("generate_{algorithm}"), |b| {
            let config = bench_config(algorithm);
            b.iter(|| {
                let level = generator.generate_level(&scenario, &config).unwrap();
                black_box(level)
            });
        });
    }
}

/// Benchmarks the analysis and placement stages on a fixed level.
pub fn placement_benchmark(c: &mut Criterion) {
    let generator = LevelGenerator::new();
    let scenario = ScenarioInput::for_genre("fantasy");
    let level = generator
        .generate_level(&scenario, &bench_config(Algorithm::Hybrid))
        .unwrap();

    c.bench_function("path_analysis", |b| {
        b.iter(|| black_box(PathAnalyzer.find_player_paths(&level)));
    });

    let engine = ObjectPlacementEngine::new();
    c.bench_function("place_objects", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            black_box(engine.place_objects(&level, &scenario, None, &mut rng))
        });
    });
}

criterion_group!(benches, generation_benchmark, placement_benchmark);
criterion_main!(benches);
