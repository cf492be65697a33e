//! End-to-end generation tests across algorithms and genres.
//!
//! These run the full [`LevelGenerator`] pipeline rather than single
//! strategies, so genre modifiers and post-processing are included.

use levelgen_core::prelude::*;
use levelgen_test_utils::determinism::verify_determinism;
use levelgen_test_utils::fixtures;

fn generate(algorithm: Algorithm, genre: &str, seed: u64) -> GeneratedLevel {
    let config = GenerationConfig::default()
        .with_algorithm(algorithm)
        .with_seed(seed);
    LevelGenerator::new()
        .generate_level(&ScenarioInput::for_genre(genre), &config)
        .expect("generation should succeed")
}

// =============================================================================
// Maze structure
// =============================================================================

mod maze {
    use super::*;

    /// Flood fill from the first floor tile, 4-connected.
    fn reachable_floors(grid: &TileGrid) -> usize {
        let floors = grid.positions_of(TileType::Floor);
        let Some(&start) = floors.first() else {
            return 0;
        };

        let mut visited = vec![start];
        let mut stack = vec![start];
        while let Some((x, y)) = stack.pop() {
            for (dx, dy) in [(1i64, 0i64), (-1, 0), (0, 1), (0, -1)] {
                let (nx, ny) = (i64::from(x) + dx, i64::from(y) + dy);
                if let Some(TileType::Floor) = grid.get_signed(nx, ny) {
                    let pos = (nx as u32, ny as u32);
                    if !visited.contains(&pos) {
                        visited.push(pos);
                        stack.push(pos);
                    }
                }
            }
        }
        visited.len()
    }

    /// A 20x20 request rounds down to a 19x19 maze with a solid
    /// outer wall, and every corridor tile is reachable from any other.
    #[test]
    fn test_even_request_becomes_odd_connected_maze() {
        // A genre outside the modifier table, so no special tiles
        // disturb the corridor structure.
        let config = GenerationConfig::default()
            .with_size(20, 20)
            .with_algorithm(Algorithm::Maze)
            .with_seed(7);
        let level = LevelGenerator::new()
            .generate_level(&ScenarioInput::for_genre("western"), &config)
            .unwrap();

        assert_eq!(level.width, 19);
        assert_eq!(level.height, 19);
        assert_eq!(level.tiles.width(), 19);

        for x in 0..19 {
            assert_eq!(level.tiles.get(x, 0), Some(TileType::Wall));
            assert_eq!(level.tiles.get(x, 18), Some(TileType::Wall));
        }
        for y in 0..19 {
            assert_eq!(level.tiles.get(0, y), Some(TileType::Wall));
            assert_eq!(level.tiles.get(18, y), Some(TileType::Wall));
        }

        let floor_count = level.tiles.count_of(TileType::Floor);
        assert!(floor_count > 0);
        assert_eq!(reachable_floors(&level.tiles), floor_count);
    }

    #[test]
    fn test_odd_request_keeps_dimensions() {
        let config = GenerationConfig::default()
            .with_size(21, 15)
            .with_algorithm(Algorithm::Maze)
            .with_seed(3);
        let level = LevelGenerator::new()
            .generate_level(&ScenarioInput::for_genre("western"), &config)
            .unwrap();
        assert_eq!((level.width, level.height), (21, 15));
    }
}

// =============================================================================
// Determinism
// =============================================================================

mod determinism {
    use super::*;

    /// The same seed yields the identical level, twice in a row.
    #[test]
    fn test_cellular_same_seed_matches() {
        let a = generate(Algorithm::Cellular, "fantasy", 1);
        let b = generate(Algorithm::Cellular, "fantasy", 1);
        assert_eq!(a, b);
    }

    /// A different seed yields a different layout.
    #[test]
    fn test_cellular_different_seed_differs() {
        let a = generate(Algorithm::Cellular, "fantasy", 1);
        let b = generate(Algorithm::Cellular, "fantasy", 2);
        assert_ne!(a.tiles, b.tiles);
    }

    #[test]
    fn test_all_algorithms_reproduce_via_harness() {
        for algorithm in Algorithm::ALL {
            let result = verify_determinism(3, || generate(algorithm, "cyberpunk", 99).tiles);
            result.assert_deterministic();
        }
    }
}

// =============================================================================
// Output invariants
// =============================================================================

mod invariants {
    use super::*;

    #[test]
    fn test_key_points_in_bounds_for_all_algorithms_and_genres() {
        for algorithm in Algorithm::ALL {
            for scenario in fixtures::all_genre_scenarios() {
                let config = fixtures::small_config(algorithm);
                let level = LevelGenerator::new()
                    .generate_level(&scenario, &config)
                    .unwrap();

                let points = level
                    .spawn_points
                    .iter()
                    .chain(level.goal_points.iter())
                    .chain(level.special_areas.values().flatten());
                for &(x, y) in points {
                    assert!(
                        x < level.width && y < level.height,
                        "{algorithm}/{}: ({x}, {y}) out of bounds",
                        scenario.genre
                    );
                }
            }
        }
    }

    #[test]
    fn test_spawn_and_goal_points_always_present() {
        for algorithm in Algorithm::ALL {
            let level = generate(algorithm, "fantasy", 4);
            assert!(!level.spawn_points.is_empty(), "{algorithm}: no spawns");
            assert!(!level.goal_points.is_empty(), "{algorithm}: no goals");
        }
    }

    #[test]
    fn test_metadata_records_request() {
        let level = generate(Algorithm::Noise, "horror", 123);
        assert_eq!(level.metadata["algorithm"], serde_json::json!("noise"));
        assert_eq!(level.metadata["genre"], serde_json::json!("horror"));
        assert_eq!(level.metadata["seed"], serde_json::json!(123));
        assert!(level.metadata.contains_key("generation_params"));
    }

    #[test]
    fn test_levels_round_trip_through_json() {
        let level = generate(Algorithm::Hybrid, "fantasy", 11);
        let encoded = serde_json::to_string(&level).unwrap();
        let decoded: GeneratedLevel = serde_json::from_str(&encoded).unwrap();
        assert_eq!(level, decoded);
    }
}

// =============================================================================
// Analysis over generated levels
// =============================================================================

mod analysis {
    use super::*;

    #[test]
    fn test_fields_normalized_on_generated_level() {
        let level = fixtures::generate_fixture_level(&fixtures::standard_config(Algorithm::Hybrid));
        let paths = PathAnalyzer.find_player_paths(&level);

        let difficulty = DifficultyZoneAnalyzer.analyze_difficulty_zones(&level, &paths);
        let visibility = VisibilityAnalyzer.compute_visibility_map(&level, &paths);

        assert!(difficulty.values().all(|v| (0.0..=1.0).contains(&v)));
        assert!(visibility.values().all(|v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_open_room_paths_connect_spawn_to_goal() {
        let level = fixtures::open_room_level(20, 20);
        let paths = PathAnalyzer.find_player_paths(&level);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].first(), Some(&(1, 1)));
        assert_eq!(paths[0].last(), Some(&(18, 18)));
    }
}
