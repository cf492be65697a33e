//! Randomized depth-first maze carving.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::grid::{TileGrid, TileType};

use super::GenerationStrategy;

/// Perfect maze from iterative depth-first backtracking.
///
/// Odd coordinates are cells, even coordinates are removable walls
/// between them, so each even dimension shrinks to the nearest odd
/// value below it. The carved region is a spanning tree: fully
/// connected and acyclic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Maze;

/// Largest odd value not exceeding `n` (minimum 1).
const fn nearest_odd(n: u32) -> u32 {
    if n % 2 == 0 {
        n.saturating_sub(1)
    } else {
        n
    }
}

impl GenerationStrategy for Maze {
    fn generate(&self, config: &GenerationConfig, rng: &mut ChaCha8Rng) -> Result<TileGrid> {
        let width = nearest_odd(config.width).max(1);
        let height = nearest_odd(config.height).max(1);
        let mut grid = TileGrid::filled(width, height, TileType::Wall);

        // Too small to hold a single interior cell.
        if width < 3 || height < 3 {
            return Ok(grid);
        }

        let cells_x = (width - 1) / 2;
        let cells_y = (height - 1) / 2;
        let start_x = 1 + 2 * rng.gen_range(0..cells_x);
        let start_y = 1 + 2 * rng.gen_range(0..cells_y);

        // Explicit stack instead of recursion: carving a large grid
        // would otherwise exceed the call-stack depth.
        let mut stack: Vec<(u32, u32)> = vec![(start_x, start_y)];
        grid.set(start_x, start_y, TileType::Floor);

        while let Some(&(x, y)) = stack.last() {
            let mut directions: [(i64, i64); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];
            directions.shuffle(rng);

            let mut advanced = false;
            for (dx, dy) in directions {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx <= 0 || ny <= 0 || nx >= (width - 1) as i64 || ny >= (height - 1) as i64 {
                    continue;
                }
                let (nx, ny) = (nx as u32, ny as u32);
                if grid.get(nx, ny) == Some(TileType::Wall) {
                    // Knock out the wall between the two cells.
                    let wall_x = (x as i64 + dx / 2) as u32;
                    let wall_y = (y as i64 + dy / 2) as u32;
                    grid.set(wall_x, wall_y, TileType::Floor);
                    grid.set(nx, ny, TileType::Floor);
                    stack.push((nx, ny));
                    advanced = true;
                    break;
                }
            }

            if !advanced {
                let _ = stack.pop();
            }
        }

        Ok(grid)
    }
}
