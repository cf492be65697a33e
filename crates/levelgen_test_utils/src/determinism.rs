//! Determinism testing utilities.
//!
//! Provides a harness for verifying that generation produces identical
//! results given identical seeds.
//!
//! # Testing Strategy
//!
//! Seeded generation must be 100% reproducible. Sources of
//! non-determinism include:
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   Level and placement state uses `BTreeMap` or sorted iteration.
//!
//! - **System randomness**: No calls to entropy sources when a seed is
//!   given. All random behavior flows through one seeded `ChaCha8Rng`.
//!
//! - **Float comparison order**: Sorts over float scores use
//!   `total_cmp` with stable sorting over a fixed enumeration order.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: Individual strategy determinism
//! 2. **Property tests**: Random configs must still reproduce exactly
//! 3. **Integration tests**: Full generate-and-place runs match
//! 4. **Parallel tests**: Running N generations in parallel all match

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for deterministic generation).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that generation was deterministic, with a detailed error
    /// message.
    ///
    /// # Panics
    ///
    /// Panics if runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Generation is non-deterministic!\n\
                 Runs: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Result of parallel generation runs.
#[derive(Debug, Clone)]
pub struct ParallelGenResult {
    /// Output hash from each run.
    pub hashes: Vec<u64>,
    /// Number of runs.
    pub num_runs: usize,
}

impl ParallelGenResult {
    /// Check if all runs produced identical results.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.hashes.windows(2).all(|w| w[0] == w[1])
    }

    /// Assert all runs matched.
    ///
    /// # Panics
    ///
    /// Panics if runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic() {
            let mut unique: Vec<u64> = self.hashes.clone();
            unique.sort_unstable();
            unique.dedup();
            panic!(
                "Parallel generations diverged!\n\
                 Runs: {}\n\
                 Unique hashes: {}\n\
                 All hashes: {:?}",
                self.num_runs,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a generation closure multiple times and verify determinism.
///
/// # Example
///
/// ```ignore
/// use levelgen_test_utils::determinism::verify_determinism;
/// use levelgen_core::prelude::*;
///
/// let config = GenerationConfig::default().with_seed(42);
/// let result = verify_determinism(5, || {
///     LevelGenerator::new()
///         .generate_level(&ScenarioInput::for_genre("fantasy"), &config)
///         .unwrap()
///         .tiles
/// });
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<T, F>(runs: usize, generate: F) -> DeterminismResult
where
    T: Hash,
    F: Fn() -> T,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        hashes.push(compute_hash(&generate()));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
    }
}

/// Run N generations in parallel and collect output hashes.
///
/// Catches non-determinism that only manifests under thread scheduling
/// variations or memory layout differences.
pub fn run_parallel_generations<T, F>(generate: F, num_runs: usize) -> ParallelGenResult
where
    T: Hash,
    F: Fn() -> T + Sync,
{
    let hashes = thread::scope(|s| {
        let handles: Vec<_> = (0..num_runs)
            .map(|_| s.spawn(|| compute_hash(&generate())))
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    ParallelGenResult { hashes, num_runs }
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for determinism testing.
///
/// These strategies generate random but reproducible inputs for
/// property-based testing of generation determinism.
pub mod strategies {
    use levelgen_core::config::Algorithm;
    use proptest::prelude::*;

    /// Generate a grid dimension in a practical range.
    pub fn arb_dimension() -> impl Strategy<Value = u32> {
        8u32..48u32
    }

    /// Generate a (width, height) pair.
    pub fn arb_dimensions() -> impl Strategy<Value = (u32, u32)> {
        (arb_dimension(), arb_dimension())
    }

    /// Generate an arbitrary seed.
    pub fn arb_seed() -> impl Strategy<Value = u64> {
        any::<u64>()
    }

    /// Generate any generation algorithm.
    pub fn arb_algorithm() -> impl Strategy<Value = Algorithm> {
        prop_oneof![
            Just(Algorithm::Cellular),
            Just(Algorithm::Noise),
            Just(Algorithm::Maze),
            Just(Algorithm::PatternCollapse),
            Just(Algorithm::Hybrid),
        ]
    }

    /// Generate a genre tag, including ones with no modifier table.
    pub fn arb_genre() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("fantasy".to_string()),
            Just("cyberpunk".to_string()),
            Just("horror".to_string()),
            Just("post-apocalyptic".to_string()),
            Just("western".to_string()),
        ]
    }

    /// Generate a wall probability in the useful band.
    pub fn arb_wall_probability() -> impl Strategy<Value = f32> {
        0.2f32..0.7f32
    }
}
