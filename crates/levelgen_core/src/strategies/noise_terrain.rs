//! Coherent-noise terrain generation.

use rand_chacha::ChaCha8Rng;

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::grid::{TileGrid, TileType};
use crate::noise::PerlinNoise;

use super::{next_noise_seed, GenerationStrategy};

/// Noise value below which a cell becomes water.
const WATER_THRESHOLD: f64 = -0.3;
/// Noise value below which a cell becomes floor.
const FLOOR_THRESHOLD: f64 = 0.0;
/// Noise value below which a cell becomes obstacle; above is wall.
const OBSTACLE_THRESHOLD: f64 = 0.3;

/// Terrain banding from thresholded fractal Perlin noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoiseTerrain;

/// Map one noise reading into a terrain band.
pub(crate) fn band_for(value: f64) -> TileType {
    if value < WATER_THRESHOLD {
        TileType::Water
    } else if value < FLOOR_THRESHOLD {
        TileType::Floor
    } else if value < OBSTACLE_THRESHOLD {
        TileType::Obstacle
    } else {
        TileType::Wall
    }
}

impl GenerationStrategy for NoiseTerrain {
    fn generate(&self, config: &GenerationConfig, rng: &mut ChaCha8Rng) -> Result<TileGrid> {
        let noise = PerlinNoise::new(next_noise_seed(rng));
        let mut grid = TileGrid::filled(config.width, config.height, TileType::Empty);

        for y in 0..config.height {
            for x in 0..config.width {
                let value = noise.fbm(
                    f64::from(x) * config.noise_scale,
                    f64::from(y) * config.noise_scale,
                    config.octaves,
                    config.persistence,
                    config.lacunarity,
                );
                grid.set(x, y, band_for(value));
            }
        }

        Ok(grid)
    }
}
