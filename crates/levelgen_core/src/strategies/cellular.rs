//! Cellular automaton cave generation.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::grid::{TileGrid, TileType};

use super::GenerationStrategy;

/// Neighbor count at or above which a cell becomes wall.
const BIRTH_LIMIT: u32 = 5;
/// Neighbor count at or below which a cell becomes floor.
const DEATH_LIMIT: u32 = 3;

/// Cave-like layouts from iterated neighborhood smoothing.
///
/// Cells seed as wall with `wall_probability`, then each iteration
/// applies the 5/3 rule over the 8-neighborhood of the previous
/// generation. The outer ring is forced to wall afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellularAutomaton;

impl GenerationStrategy for CellularAutomaton {
    fn generate(&self, config: &GenerationConfig, rng: &mut ChaCha8Rng) -> Result<TileGrid> {
        let (width, height) = (config.width, config.height);
        let mut grid = TileGrid::filled(width, height, TileType::Floor);

        for y in 0..height {
            for x in 0..width {
                if rng.gen::<f32>() < config.wall_probability {
                    grid.set(x, y, TileType::Wall);
                }
            }
        }

        for _ in 0..config.iterations {
            // Double-buffered: the whole pass reads the previous generation.
            let previous = grid.clone();
            for y in 1..height.saturating_sub(1) {
                for x in 1..width.saturating_sub(1) {
                    let walls = previous.neighbor_count(x, y, TileType::Wall);
                    if walls >= BIRTH_LIMIT {
                        grid.set(x, y, TileType::Wall);
                    } else if walls <= DEATH_LIMIT {
                        grid.set(x, y, TileType::Floor);
                    }
                }
            }
        }

        grid.set_border(TileType::Wall);
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn config(seed: u64) -> GenerationConfig {
        GenerationConfig {
            seed: Some(seed),
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn test_border_is_all_wall() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let grid = CellularAutomaton.generate(&config(9), &mut rng).unwrap();

        for x in 0..grid.width() {
            assert_eq!(grid.get(x, 0), Some(TileType::Wall));
            assert_eq!(grid.get(x, grid.height() - 1), Some(TileType::Wall));
        }
        for y in 0..grid.height() {
            assert_eq!(grid.get(0, y), Some(TileType::Wall));
            assert_eq!(grid.get(grid.width() - 1, y), Some(TileType::Wall));
        }
    }

    #[test]
    fn test_same_seed_same_grid() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(1);
        let mut rng2 = ChaCha8Rng::seed_from_u64(1);
        let a = CellularAutomaton.generate(&config(1), &mut rng1).unwrap();
        let b = CellularAutomaton.generate(&config(1), &mut rng2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_differs() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(1);
        let mut rng2 = ChaCha8Rng::seed_from_u64(2);
        let a = CellularAutomaton.generate(&config(1), &mut rng1).unwrap();
        let b = CellularAutomaton.generate(&config(2), &mut rng2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wall_probability_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let solid = GenerationConfig {
            wall_probability: 1.0,
            ..config(3)
        };
        let grid = CellularAutomaton.generate(&solid, &mut rng).unwrap();
        assert_eq!(grid.count_of(TileType::Floor), 0);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let open = GenerationConfig {
            wall_probability: 0.0,
            ..config(3)
        };
        let grid = CellularAutomaton.generate(&open, &mut rng).unwrap();
        // Interior stays floor, only the forced border is wall.
        assert_eq!(
            grid.count_of(TileType::Floor),
            (grid.width() as usize - 2) * (grid.height() as usize - 2)
        );
    }
}
