//! Fixture helpers for generation tests.
//!
//! Standard configs and scenarios so tests across crates exercise the
//! same shapes instead of hand-rolling near-duplicates.

use levelgen_core::config::{Algorithm, GenerationConfig, ScenarioInput};
use levelgen_core::generator::{GeneratedLevel, LevelGenerator};
use levelgen_core::grid::{TileGrid, TileType};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

/// Seed used by the fixed fixtures.
pub const FIXTURE_SEED: u64 = 42;

/// A fresh rng seeded with [`FIXTURE_SEED`].
#[must_use]
pub fn fixture_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(FIXTURE_SEED)
}

/// A small seeded config for fast unit tests.
#[must_use]
pub fn small_config(algorithm: Algorithm) -> GenerationConfig {
    GenerationConfig::default()
        .with_size(16, 16)
        .with_algorithm(algorithm)
        .with_seed(FIXTURE_SEED)
}

/// A medium seeded config sized like production levels.
#[must_use]
pub fn standard_config(algorithm: Algorithm) -> GenerationConfig {
    GenerationConfig::default()
        .with_algorithm(algorithm)
        .with_seed(FIXTURE_SEED)
}

/// Generate a level from a config with the fantasy scenario.
///
/// # Panics
///
/// Panics if generation fails; fixtures use known-valid configs.
#[must_use]
pub fn generate_fixture_level(config: &GenerationConfig) -> GeneratedLevel {
    LevelGenerator::new()
        .generate_level(&ScenarioInput::for_genre("fantasy"), config)
        .expect("fixture config should generate")
}

/// An open-floor level with a wall border, one spawn and one goal.
///
/// Useful for placement and analysis tests that need full control of
/// the layout instead of a generated one.
#[must_use]
pub fn open_room_level(width: u32, height: u32) -> GeneratedLevel {
    let mut grid = TileGrid::filled(width, height, TileType::Floor);
    grid.set_border(TileType::Wall);
    GeneratedLevel {
        width,
        height,
        tiles: grid,
        spawn_points: vec![(1, 1)],
        goal_points: vec![(width - 2, height - 2)],
        special_areas: BTreeMap::new(),
        metadata: BTreeMap::new(),
    }
}

/// One scenario per genre with a modifier table.
#[must_use]
pub fn all_genre_scenarios() -> Vec<ScenarioInput> {
    ["fantasy", "cyberpunk", "horror", "post-apocalyptic"]
        .into_iter()
        .map(ScenarioInput::for_genre)
        .collect()
}
