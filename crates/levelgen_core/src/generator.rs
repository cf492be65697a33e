//! Level generation orchestrator.
//!
//! [`LevelGenerator`] selects a strategy by algorithm tag, applies the
//! genre modifier table, post-processes the base grid with
//! genre-specific special tiles, and derives spawn/goal/special areas
//! plus a metadata snapshot.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{Algorithm, GenerationConfig, ScenarioInput};
use crate::error::Result;
use crate::grid::{TileGrid, TileType};
use crate::strategies::{strategy_for, GenerationStrategy};

/// Maximum number of special tiles scattered during post-processing.
const MAX_SPECIAL_TILES: usize = 5;
/// Number of spawn points derived per level.
const SPAWN_POINT_COUNT: usize = 3;
/// Number of goal points derived per level.
const GOAL_POINT_COUNT: usize = 2;

/// A fully generated level: the tile grid plus derived key points and
/// generation metadata.
///
/// Created once per request and consumed read-only by the placement
/// engine and external serializers. Every listed coordinate is in
/// bounds for the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLevel {
    /// The tile grid.
    pub tiles: TileGrid,
    /// Grid width in tiles (may be smaller than requested; the maze
    /// algorithm reduces even dimensions to odd).
    pub width: u32,
    /// Grid height in tiles.
    pub height: u32,
    /// Player spawn candidates, ranked nearest-corner first.
    pub spawn_points: Vec<(u32, u32)>,
    /// Objective positions, ranked most remote first.
    pub goal_points: Vec<(u32, u32)>,
    /// Coordinates grouped by special tile kind ("secret", "trap", "water").
    pub special_areas: BTreeMap<String, Vec<(u32, u32)>>,
    /// Generation metadata: algorithm, genre, seed, parameter snapshot.
    pub metadata: BTreeMap<String, Value>,
}

/// Genre entry: overrides for config fields plus the special tiles the
/// genre is allowed to scatter. Only the fields an entry names are
/// overwritten.
#[derive(Debug, Clone, Copy)]
struct GenreModifier {
    wall_probability: Option<f32>,
    corridor_width: Option<u32>,
    special_tiles: &'static [TileType],
}

fn genre_modifier(genre: &str) -> Option<GenreModifier> {
    match genre {
        "cyberpunk" => Some(GenreModifier {
            wall_probability: Some(0.3),
            corridor_width: None,
            special_tiles: &[TileType::Trap, TileType::Secret],
        }),
        "fantasy" => Some(GenreModifier {
            wall_probability: Some(0.4),
            corridor_width: None,
            special_tiles: &[TileType::Secret],
        }),
        "horror" => Some(GenreModifier {
            wall_probability: Some(0.6),
            corridor_width: Some(1),
            special_tiles: &[TileType::Trap],
        }),
        "post-apocalyptic" => Some(GenreModifier {
            wall_probability: Some(0.35),
            corridor_width: None,
            special_tiles: &[TileType::Obstacle, TileType::Trap],
        }),
        _ => None,
    }
}

/// Strategy dispatch plus post-processing for full levels.
pub struct LevelGenerator {
    strategies: BTreeMap<Algorithm, Box<dyn GenerationStrategy + Send + Sync>>,
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelGenerator {
    /// Build a generator with every algorithm registered.
    #[must_use]
    pub fn new() -> Self {
        let strategies = Algorithm::ALL
            .into_iter()
            .map(|algorithm| (algorithm, strategy_for(algorithm)))
            .collect();
        Self { strategies }
    }

    /// Generate a level for a scenario.
    ///
    /// Deterministic when `config.seed` is set. Any internal failure
    /// propagates unmodified; regeneration with a new seed is the
    /// caller's decision.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid dimensions before any
    /// grid is allocated.
    pub fn generate_level(
        &self,
        scenario: &ScenarioInput,
        config: &GenerationConfig,
    ) -> Result<GeneratedLevel> {
        let genre = scenario.genre.trim().to_lowercase();
        let mut config = config.clone();
        let special_tiles = apply_genre_modifiers(&mut config, &genre);
        config.validate()?;

        tracing::info!(
            width = config.width,
            height = config.height,
            algorithm = config.algorithm.as_str(),
            genre = genre.as_str(),
            "generating level"
        );

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        // The registry covers every Algorithm variant, but dispatch
        // through the map keeps strategies swappable in one place.
        let strategy = self
            .strategies
            .get(&config.algorithm)
            .ok_or_else(|| crate::error::GenError::UnknownAlgorithm(config.algorithm.to_string()))?;

        let base = strategy.generate(&config, &mut rng)?;
        let tiles = scatter_special_tiles(base, special_tiles, &mut rng);

        let spawn_points = find_spawn_points(&tiles);
        let goal_points = find_goal_points(&tiles);
        let special_areas = find_special_areas(&tiles);
        let metadata = build_metadata(&config, &genre)?;

        tracing::debug!(
            spawns = spawn_points.len(),
            goals = goal_points.len(),
            special_areas = special_areas.len(),
            "level post-processing complete"
        );

        Ok(GeneratedLevel {
            width: tiles.width(),
            height: tiles.height(),
            tiles,
            spawn_points,
            goal_points,
            special_areas,
            metadata,
        })
    }
}

/// Overwrite only the config fields the genre's table entry names and
/// return the genre's special tile list.
fn apply_genre_modifiers(config: &mut GenerationConfig, genre: &str) -> &'static [TileType] {
    let Some(modifier) = genre_modifier(genre) else {
        return &[];
    };
    if let Some(wall_probability) = modifier.wall_probability {
        config.wall_probability = wall_probability;
    }
    if let Some(corridor_width) = modifier.corridor_width {
        config.corridor_width = corridor_width;
    }
    modifier.special_tiles
}

/// Scatter up to [`MAX_SPECIAL_TILES`] genre tiles (at most 10% of the
/// floor count) onto distinct, uniformly sampled floor tiles, cycling
/// through the genre list. Works on a fresh copy of the base grid.
fn scatter_special_tiles(
    base: TileGrid,
    special_tiles: &[TileType],
    rng: &mut ChaCha8Rng,
) -> TileGrid {
    let mut tiles = base;
    if special_tiles.is_empty() {
        return tiles;
    }

    let floors = tiles.positions_of(TileType::Floor);
    let count = (floors.len() / 10).min(MAX_SPECIAL_TILES);
    if count == 0 {
        return tiles;
    }

    let chosen = rand::seq::index::sample(rng, floors.len(), count);
    for (i, floor_index) in chosen.into_iter().enumerate() {
        let (x, y) = floors[floor_index];
        tiles.set(x, y, special_tiles[i % special_tiles.len()]);
    }
    tiles
}

/// Distance from a tile to its nearest grid corner.
fn corner_distance(grid: &TileGrid, x: u32, y: u32) -> f32 {
    let (w, h) = (grid.width() - 1, grid.height() - 1);
    let corners = [(0, 0), (w, 0), (0, h), (w, h)];
    corners
        .iter()
        .map(|&(cx, cy)| {
            let dx = f64::from(x) - f64::from(cx);
            let dy = f64::from(y) - f64::from(cy);
            (dx * dx + dy * dy).sqrt() as f32
        })
        .fold(f32::INFINITY, f32::min)
}

/// Rank floor tiles by ascending nearest-corner distance and keep the
/// closest few as spawn candidates.
///
/// Ties resolve to the earlier tile in row-major enumeration order via
/// the stable sort. Falls back to `(1, 1)` when the grid has no floor.
fn find_spawn_points(grid: &TileGrid) -> Vec<(u32, u32)> {
    let floors = grid.positions_of(TileType::Floor);
    if floors.is_empty() {
        return vec![(1, 1)];
    }

    let mut ranked: Vec<((u32, u32), f32)> = floors
        .into_iter()
        .map(|(x, y)| ((x, y), corner_distance(grid, x, y)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
        .into_iter()
        .take(SPAWN_POINT_COUNT)
        .map(|(pos, _)| pos)
        .collect()
}

/// Use existing goal tiles when present; otherwise rank floor tiles by
/// descending nearest-corner distance (the most remote tiles win).
fn find_goal_points(grid: &TileGrid) -> Vec<(u32, u32)> {
    let goals = grid.positions_of(TileType::Goal);
    if !goals.is_empty() {
        return goals;
    }

    let floors = grid.positions_of(TileType::Floor);
    if floors.is_empty() {
        return vec![(grid.width().saturating_sub(2), grid.height().saturating_sub(2))];
    }

    let mut ranked: Vec<((u32, u32), f32)> = floors
        .into_iter()
        .map(|(x, y)| ((x, y), corner_distance(grid, x, y)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .take(GOAL_POINT_COUNT)
        .map(|(pos, _)| pos)
        .collect()
}

/// Group secret, trap, and water coordinates by kind.
fn find_special_areas(grid: &TileGrid) -> BTreeMap<String, Vec<(u32, u32)>> {
    let mut areas = BTreeMap::new();
    for (name, tile) in [
        ("secret", TileType::Secret),
        ("trap", TileType::Trap),
        ("water", TileType::Water),
    ] {
        let positions = grid.positions_of(tile);
        if !positions.is_empty() {
            let _ = areas.insert(name.to_string(), positions);
        }
    }
    areas
}

fn build_metadata(config: &GenerationConfig, genre: &str) -> Result<BTreeMap<String, Value>> {
    let mut metadata = BTreeMap::new();
    let _ = metadata.insert(
        "algorithm".to_string(),
        Value::from(config.algorithm.as_str()),
    );
    let _ = metadata.insert("genre".to_string(), Value::from(genre));
    let _ = metadata.insert("seed".to_string(), serde_json::to_value(config.seed)?);
    let _ = metadata.insert("generation_params".to_string(), serde_json::to_value(config)?);
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(algorithm: Algorithm, seed: u64) -> GenerationConfig {
        GenerationConfig::default()
            .with_algorithm(algorithm)
            .with_seed(seed)
    }

    fn all_in_bounds(level: &GeneratedLevel) -> bool {
        let points = level
            .spawn_points
            .iter()
            .chain(level.goal_points.iter())
            .chain(level.special_areas.values().flatten());
        points
            .into_iter()
            .all(|&(x, y)| x < level.width && y < level.height)
    }

    #[test]
    fn test_generate_level_basics() {
        let generator = LevelGenerator::new();
        let scenario = ScenarioInput::for_genre("fantasy");
        let level = generator
            .generate_level(&scenario, &config(Algorithm::Cellular, 42))
            .unwrap();

        assert_eq!(level.width, 32);
        assert_eq!(level.height, 32);
        assert!(!level.spawn_points.is_empty());
        assert!(!level.goal_points.is_empty());
        assert!(all_in_bounds(&level));
        assert_eq!(level.metadata["algorithm"], Value::from("cellular"));
        assert_eq!(level.metadata["genre"], Value::from("fantasy"));
        assert_eq!(level.metadata["seed"], Value::from(42));
    }

    #[test]
    fn test_determinism_across_algorithms() {
        let generator = LevelGenerator::new();
        let scenario = ScenarioInput::for_genre("cyberpunk");
        for algorithm in Algorithm::ALL {
            let a = generator
                .generate_level(&scenario, &config(algorithm, 7))
                .unwrap();
            let b = generator
                .generate_level(&scenario, &config(algorithm, 7))
                .unwrap();
            assert_eq!(a, b, "{algorithm} not deterministic");
        }
    }

    #[test]
    fn test_genre_modifier_overwrites_named_fields_only() {
        let mut config = GenerationConfig::default();
        let baseline_iterations = config.iterations;
        let specials = apply_genre_modifiers(&mut config, "horror");

        assert!((config.wall_probability - 0.6).abs() < f32::EPSILON);
        assert_eq!(config.corridor_width, 1);
        assert_eq!(config.iterations, baseline_iterations);
        assert_eq!(specials, &[TileType::Trap]);
    }

    #[test]
    fn test_unknown_genre_leaves_config_untouched() {
        let mut config = GenerationConfig::default();
        let baseline = config.clone();
        let specials = apply_genre_modifiers(&mut config, "noir western");
        assert_eq!(config, baseline);
        assert!(specials.is_empty());
    }

    #[test]
    fn test_special_tiles_bounded_and_on_floor() {
        let generator = LevelGenerator::new();
        let scenario = ScenarioInput::for_genre("cyberpunk");
        let level = generator
            .generate_level(&scenario, &config(Algorithm::Cellular, 5))
            .unwrap();

        let scattered: usize = level
            .special_areas
            .iter()
            .filter(|(name, _)| name.as_str() != "water")
            .map(|(_, positions)| positions.len())
            .sum();
        assert!(scattered <= MAX_SPECIAL_TILES);
    }

    #[test]
    fn test_spawn_points_prefer_corners() {
        let generator = LevelGenerator::new();
        let scenario = ScenarioInput::for_genre("fantasy");
        let level = generator
            .generate_level(&scenario, &config(Algorithm::Hybrid, 9))
            .unwrap();

        let closest = corner_distance(&level.tiles, level.spawn_points[0].0, level.spawn_points[0].1);
        let farthest = corner_distance(&level.tiles, level.goal_points[0].0, level.goal_points[0].1);
        assert!(closest <= farthest);
    }

    #[test]
    fn test_spawn_fallback_when_no_floor() {
        // An all-wall grid exercises the fallback coordinates.
        let grid = TileGrid::filled(8, 8, TileType::Wall);
        assert_eq!(find_spawn_points(&grid), vec![(1, 1)]);
        assert_eq!(find_goal_points(&grid), vec![(6, 6)]);
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        let generator = LevelGenerator::new();
        let scenario = ScenarioInput::for_genre("fantasy");
        let bad = GenerationConfig::default().with_size(0, 0);
        assert!(generator.generate_level(&scenario, &bad).is_err());
    }
}
