//! Pattern-library textured fill.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::grid::{TileGrid, TileType};

use super::GenerationStrategy;

/// A 3x3 exemplar pattern. Only the center tile lands in the grid; the
/// ring documents the neighborhood the exemplar was lifted from.
pub type Pattern = [[TileType; 3]; 3];

const W: TileType = TileType::Wall;
const F: TileType = TileType::Floor;
const D: TileType = TileType::Door;

/// Textured-random fill from a small library of 3x3 exemplars.
///
/// Each cell independently receives the center tile of a uniformly
/// chosen pattern. Deliberately *not* true constraint propagation
/// between neighboring cells; every cell is always assigned.
#[derive(Debug, Clone)]
pub struct PatternCollapse {
    patterns: Vec<Pattern>,
}

impl Default for PatternCollapse {
    fn default() -> Self {
        Self {
            patterns: vec![
                // Open floor
                [[F, F, F], [F, F, F], [F, F, F]],
                // Wall corner
                [[W, W, F], [W, W, F], [F, F, F]],
                // Straight wall
                [[W, W, W], [F, F, F], [F, F, F]],
                // Doorway
                [[W, D, W], [F, F, F], [F, F, F]],
            ],
        }
    }
}

impl PatternCollapse {
    /// Build a generator over a custom exemplar library.
    ///
    /// # Panics
    ///
    /// Panics if `patterns` is empty; a cell could not be assigned.
    #[must_use]
    pub fn with_patterns(patterns: Vec<Pattern>) -> Self {
        assert!(!patterns.is_empty(), "pattern library must not be empty");
        Self { patterns }
    }
}

impl GenerationStrategy for PatternCollapse {
    fn generate(&self, config: &GenerationConfig, rng: &mut ChaCha8Rng) -> Result<TileGrid> {
        let mut grid = TileGrid::filled(config.width, config.height, TileType::Empty);

        for y in 0..config.height {
            for x in 0..config.width {
                let pattern = &self.patterns[rng.gen_range(0..self.patterns.len())];
                grid.set(x, y, pattern[1][1]);
            }
        }

        Ok(grid)
    }
}
