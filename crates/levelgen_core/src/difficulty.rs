//! Per-tile difficulty field.
//!
//! Estimates challenge per walkable tile from three signals: distance
//! from the spawn points, bottleneck density, and proximity to the
//! goals. The summed field is max-normalized into `[0, 1]`.

use crate::field::ScalarField;
use crate::generator::GeneratedLevel;
use crate::pathfinding::Path;

/// Divisor normalizing spawn distance into `[0, 1]`.
const SPAWN_DISTANCE_SCALE: f32 = 10.0;
/// Free-neighbor count at or below which a tile reads as a choke point.
const CHOKE_NEIGHBOR_LIMIT: u32 = 3;
/// Radius of the goal-proximity bonus.
const GOAL_RADIUS: f32 = 5.0;

fn euclidean(a: (u32, u32), b: (u32, u32)) -> f32 {
    let dx = f64::from(a.0) - f64::from(b.0);
    let dy = f64::from(a.1) - f64::from(b.1);
    (dx * dx + dy * dy).sqrt() as f32
}

/// Challenge estimation over the walkable tiles of a level.
#[derive(Debug, Clone, Copy, Default)]
pub struct DifficultyZoneAnalyzer;

impl DifficultyZoneAnalyzer {
    /// Build the difficulty field for a level.
    ///
    /// Degrades to an all-zero field when the level has no walkable
    /// tiles or no spawn/goal signal, rather than failing.
    #[must_use]
    pub fn analyze_difficulty_zones(&self, level: &GeneratedLevel, _paths: &[Path]) -> ScalarField {
        let mut field = ScalarField::zeros(level.width, level.height);

        for y in 0..level.height {
            for x in 0..level.width {
                if !level.tiles.is_walkable(x, y) {
                    continue;
                }

                let mut value = 0.0;

                // Distance from every spawn, each clamped to 1.
                for &spawn in &level.spawn_points {
                    value += (euclidean((x, y), spawn) / SPAWN_DISTANCE_SCALE).min(1.0);
                }

                // Choke points: interior tiles with few free neighbors.
                if x > 0 && y > 0 && x < level.width - 1 && y < level.height - 1 {
                    let free = level.tiles.walkable_neighbor_count(x, y);
                    if free <= CHOKE_NEIGHBOR_LIMIT {
                        value += (4 - free) as f32 / 4.0;
                    }
                }

                // Bonus near the goals.
                for &goal in &level.goal_points {
                    let dist = euclidean((x, y), goal);
                    if dist <= GOAL_RADIUS {
                        value += (GOAL_RADIUS - dist) / GOAL_RADIUS;
                    }
                }

                field.set(x, y, value);
            }
        }

        field.max_normalize();
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{TileGrid, TileType};
    use std::collections::BTreeMap;

    fn level_from(grid: TileGrid, spawns: Vec<(u32, u32)>, goals: Vec<(u32, u32)>) -> GeneratedLevel {
        GeneratedLevel {
            width: grid.width(),
            height: grid.height(),
            tiles: grid,
            spawn_points: spawns,
            goal_points: goals,
            special_areas: BTreeMap::new(),
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn test_field_is_normalized() {
        let grid = TileGrid::filled(16, 16, TileType::Floor);
        let level = level_from(grid, vec![(1, 1)], vec![(14, 14)]);
        let field = DifficultyZoneAnalyzer.analyze_difficulty_zones(&level, &[]);

        assert!(field.values().all(|v| (0.0..=1.0).contains(&v)));
        assert!((field.max_value() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_difficulty_grows_away_from_spawn() {
        let grid = TileGrid::filled(24, 3, TileType::Floor);
        let level = level_from(grid, vec![(1, 1)], vec![]);
        let field = DifficultyZoneAnalyzer.analyze_difficulty_zones(&level, &[]);

        assert!(field.get(20, 1) > field.get(2, 1));
    }

    #[test]
    fn test_choke_point_raises_difficulty() {
        // A one-tile corridor between two open rooms.
        let mut grid = TileGrid::filled(11, 5, TileType::Wall);
        for y in 1..4 {
            for x in 1..4 {
                grid.set(x, y, TileType::Floor);
            }
            for x in 7..10 {
                grid.set(x, y, TileType::Floor);
            }
        }
        for x in 4..7 {
            grid.set(x, 2, TileType::Floor);
        }

        let level = level_from(grid, vec![(1, 2)], vec![]);
        let field = DifficultyZoneAnalyzer.analyze_difficulty_zones(&level, &[]);

        // The corridor tile reads harder than the equally distant room
        // interior above it is (a wall, so zero) and than the room entry.
        assert!(field.get(5, 2) > field.get(2, 2));
    }

    #[test]
    fn test_goal_proximity_bonus() {
        let grid = TileGrid::filled(20, 20, TileType::Floor);
        // Spawn and goal far apart; compare two tiles at the same spawn
        // distance, one inside the goal radius.
        let level = level_from(grid, vec![(10, 0)], vec![(10, 18)]);
        let field = DifficultyZoneAnalyzer.analyze_difficulty_zones(&level, &[]);

        assert!(field.get(10, 17) > field.get(0, 10));
    }

    #[test]
    fn test_no_walkable_tiles_yields_zero_field() {
        let grid = TileGrid::filled(6, 6, TileType::Wall);
        let level = level_from(grid, vec![(1, 1)], vec![(4, 4)]);
        let field = DifficultyZoneAnalyzer.analyze_difficulty_zones(&level, &[]);
        assert!(field.values().all(|v| v == 0.0));
    }
}
