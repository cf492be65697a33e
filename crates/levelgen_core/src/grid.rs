//! Tile grid data model.
//!
//! A [`TileGrid`] is the product of every generation strategy: a dense
//! width x height array of discrete tile-type codes stored in row-major
//! order. Grids are produced fresh by each generation call and never
//! mutated in place once handed to a caller; post-processing works on a
//! clone.

use serde::{Deserialize, Serialize};

/// Discrete tile-type codes used by every generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    /// Unassigned space.
    #[default]
    Empty,
    /// Impassable wall.
    Wall,
    /// Normal walkable floor.
    Floor,
    /// Walkable doorway.
    Door,
    /// Water, impassable for placement purposes.
    Water,
    /// Blocking obstacle on otherwise open terrain.
    Obstacle,
    /// Player spawn marker.
    Spawn,
    /// Objective marker.
    Goal,
    /// Hidden area marker.
    Secret,
    /// Trap tile marker.
    Trap,
}

impl TileType {
    /// Returns true if a character can occupy this tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Floor | Self::Door | Self::Spawn | Self::Goal)
    }
}

/// Dense 2D grid of tiles in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileGrid {
    /// Grid width in tiles.
    width: u32,
    /// Grid height in tiles.
    height: u32,
    /// Tile data stored in row-major order.
    tiles: Vec<TileType>,
}

impl TileGrid {
    /// Create a grid with every tile set to `fill`.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero. Dimension validation
    /// happens in [`crate::config::GenerationConfig::validate`] before
    /// any grid is allocated.
    #[must_use]
    pub fn filled(width: u32, height: u32, fill: TileType) -> Self {
        assert!(width > 0, "TileGrid width must be positive");
        assert!(height > 0, "TileGrid height must be positive");

        let tile_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            tiles: vec![fill; tile_count],
        }
    }

    /// Grid width in tiles.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in tiles.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn coords_to_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Check if coordinates are within grid bounds.
    #[must_use]
    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Get tile type at coordinates.
    /// Returns `None` if out of bounds.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<TileType> {
        if self.in_bounds(x, y) {
            Some(self.tiles[self.coords_to_index(x, y)])
        } else {
            None
        }
    }

    /// Signed-coordinate variant of [`TileGrid::get`] for neighborhood
    /// scans that step outside the grid.
    #[must_use]
    pub fn get_signed(&self, x: i64, y: i64) -> Option<TileType> {
        if x >= 0 && y >= 0 {
            self.get(x as u32, y as u32)
        } else {
            None
        }
    }

    /// Set tile type at coordinates.
    /// Returns `false` if out of bounds.
    pub fn set(&mut self, x: u32, y: u32, tile: TileType) -> bool {
        if self.in_bounds(x, y) {
            let index = self.coords_to_index(x, y);
            self.tiles[index] = tile;
            true
        } else {
            false
        }
    }

    /// Check if the tile at coordinates is walkable.
    /// Out-of-bounds coordinates are not walkable.
    #[must_use]
    pub fn is_walkable(&self, x: u32, y: u32) -> bool {
        self.get(x, y).is_some_and(TileType::is_walkable)
    }

    /// Positions of every tile equal to `tile`, in row-major order.
    ///
    /// Row-major enumeration order is part of the contract: spawn and
    /// goal ranking rely on it for deterministic tie-breaking.
    #[must_use]
    pub fn positions_of(&self, tile: TileType) -> Vec<(u32, u32)> {
        let mut positions = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.tiles[self.coords_to_index(x, y)] == tile {
                    positions.push((x, y));
                }
            }
        }
        positions
    }

    /// Number of tiles equal to `tile`.
    #[must_use]
    pub fn count_of(&self, tile: TileType) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Number of walkable tiles (floor, door, spawn, goal).
    #[must_use]
    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_walkable()).count()
    }

    /// Count how many of the 8 neighbors of `(x, y)` equal `tile`.
    /// Out-of-bounds neighbors do not match.
    #[must_use]
    pub fn neighbor_count(&self, x: u32, y: u32, tile: TileType) -> u32 {
        let mut count = 0;
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.get_signed(x as i64 + dx, y as i64 + dy) == Some(tile) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Count how many of the 8 neighbors of `(x, y)` are walkable.
    #[must_use]
    pub fn walkable_neighbor_count(&self, x: u32, y: u32) -> u32 {
        let mut count = 0;
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self
                    .get_signed(x as i64 + dx, y as i64 + dy)
                    .is_some_and(TileType::is_walkable)
                {
                    count += 1;
                }
            }
        }
        count
    }

    /// Force the outer ring of the grid to `tile`.
    pub fn set_border(&mut self, tile: TileType) {
        for x in 0..self.width {
            self.set(x, 0, tile);
            self.set(x, self.height - 1, tile);
        }
        for y in 0..self.height {
            self.set(0, y, tile);
            self.set(self.width - 1, y, tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkable_tiles() {
        assert!(TileType::Floor.is_walkable());
        assert!(TileType::Door.is_walkable());
        assert!(TileType::Spawn.is_walkable());
        assert!(TileType::Goal.is_walkable());
        assert!(!TileType::Wall.is_walkable());
        assert!(!TileType::Water.is_walkable());
        assert!(!TileType::Obstacle.is_walkable());
    }

    #[test]
    fn test_grid_creation() {
        let grid = TileGrid::filled(8, 6, TileType::Floor);
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 6);
        assert_eq!(grid.count_of(TileType::Floor), 48);
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = TileGrid::filled(5, 5, TileType::Floor);

        assert!(grid.set(2, 3, TileType::Wall));
        assert_eq!(grid.get(2, 3), Some(TileType::Wall));
        assert!(!grid.is_walkable(2, 3));

        // Out of bounds
        assert!(!grid.set(5, 0, TileType::Wall));
        assert_eq!(grid.get(0, 5), None);
        assert!(!grid.is_walkable(9, 9));
    }

    #[test]
    fn test_positions_are_row_major() {
        let mut grid = TileGrid::filled(3, 3, TileType::Wall);
        grid.set(2, 0, TileType::Floor);
        grid.set(0, 1, TileType::Floor);
        grid.set(1, 2, TileType::Floor);

        assert_eq!(
            grid.positions_of(TileType::Floor),
            vec![(2, 0), (0, 1), (1, 2)]
        );
    }

    #[test]
    fn test_neighbor_counts() {
        let mut grid = TileGrid::filled(3, 3, TileType::Floor);
        grid.set(0, 0, TileType::Wall);
        grid.set(1, 0, TileType::Wall);

        assert_eq!(grid.neighbor_count(1, 1, TileType::Wall), 2);
        assert_eq!(grid.walkable_neighbor_count(1, 1), 6);

        // Corner tile only has 3 in-bounds neighbors.
        assert_eq!(grid.walkable_neighbor_count(2, 2), 3);
    }

    #[test]
    fn test_set_border() {
        let mut grid = TileGrid::filled(4, 4, TileType::Floor);
        grid.set_border(TileType::Wall);

        for x in 0..4 {
            assert_eq!(grid.get(x, 0), Some(TileType::Wall));
            assert_eq!(grid.get(x, 3), Some(TileType::Wall));
        }
        for y in 0..4 {
            assert_eq!(grid.get(0, y), Some(TileType::Wall));
            assert_eq!(grid.get(3, y), Some(TileType::Wall));
        }
        assert_eq!(grid.get(1, 1), Some(TileType::Floor));
        assert_eq!(grid.count_of(TileType::Floor), 4);
    }
}
