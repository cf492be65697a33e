//! Hybrid generation: cellular base, carved rooms, corridors, noise overlay.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::grid::{TileGrid, TileType};
use crate::noise::PerlinNoise;

use super::noise_terrain::band_for;
use super::{next_noise_seed, CellularAutomaton, GenerationStrategy};

/// Placement attempts per room before giving up on it.
const ROOM_ATTEMPTS: u32 = 20;
/// Coordinate scale of the detail overlay pass.
const OVERLAY_SCALE: f64 = 0.2;
/// Octave count of the detail overlay pass.
const OVERLAY_OCTAVES: u32 = 2;

/// Axis-aligned carved room.
#[derive(Debug, Clone, Copy)]
struct Room {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Room {
    fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    fn overlaps(&self, other: &Room) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Cellular texture with rectangular rooms, L-shaped connecting
/// corridors, and a coarse noise overlay that litters floors with
/// obstacles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hybrid;

impl GenerationStrategy for Hybrid {
    fn generate(&self, config: &GenerationConfig, rng: &mut ChaCha8Rng) -> Result<TileGrid> {
        let mut grid = CellularAutomaton.generate(config, rng)?;

        let rooms = place_rooms(config, rng);
        for room in &rooms {
            for y in room.y..room.y + room.height {
                for x in room.x..room.x + room.width {
                    grid.set(x, y, TileType::Floor);
                }
            }
        }

        for pair in rooms.windows(2) {
            connect_rooms(&mut grid, &pair[0], &pair[1], config.corridor_width, rng);
        }

        overlay_obstacles(&mut grid, config, rng);

        // Wide corridors can spill onto the outer ring; restore it.
        grid.set_border(TileType::Wall);
        Ok(grid)
    }
}

/// Sample up to `room_count` non-overlapping rooms sized relative to
/// the grid. Rooms that cannot be placed within the attempt budget are
/// skipped rather than forced.
fn place_rooms(config: &GenerationConfig, rng: &mut ChaCha8Rng) -> Vec<Room> {
    let (width, height) = (config.width, config.height);
    let max_w = (width / 4).max(4);
    let max_h = (height / 4).max(4);
    let mut rooms: Vec<Room> = Vec::new();

    for _ in 0..config.room_count {
        for _ in 0..ROOM_ATTEMPTS {
            let room_w = rng.gen_range(4..=max_w);
            let room_h = rng.gen_range(4..=max_h);
            if width < room_w + 2 || height < room_h + 2 {
                continue;
            }
            let room = Room {
                x: rng.gen_range(1..=width - room_w - 1),
                y: rng.gen_range(1..=height - room_h - 1),
                width: room_w,
                height: room_h,
            };
            if rooms.iter().all(|existing| !room.overlaps(existing)) {
                rooms.push(room);
                break;
            }
        }
    }

    rooms
}

/// Carve an L-shaped corridor between two room centers, leg order
/// chosen randomly per connection.
fn connect_rooms(
    grid: &mut TileGrid,
    from: &Room,
    to: &Room,
    corridor_width: u32,
    rng: &mut ChaCha8Rng,
) {
    let (x1, y1) = from.center();
    let (x2, y2) = to.center();

    if rng.gen::<bool>() {
        carve_horizontal(grid, x1, x2, y1, corridor_width);
        carve_vertical(grid, x2, y1, y2, corridor_width);
    } else {
        carve_vertical(grid, x1, y1, y2, corridor_width);
        carve_horizontal(grid, x1, x2, y2, corridor_width);
    }
}

fn carve_horizontal(grid: &mut TileGrid, x1: u32, x2: u32, y: u32, width: u32) {
    let half = (width / 2) as i64;
    for x in x1.min(x2)..=x1.max(x2) {
        for dy in -half..=half {
            if let Ok(tile_y) = u32::try_from(y as i64 + dy) {
                let _ = grid.set(x, tile_y, TileType::Floor);
            }
        }
    }
}

fn carve_vertical(grid: &mut TileGrid, x: u32, y1: u32, y2: u32, width: u32) {
    let half = (width / 2) as i64;
    for y in y1.min(y2)..=y1.max(y2) {
        for dx in -half..=half {
            if let Ok(tile_x) = u32::try_from(x as i64 + dx) {
                let _ = grid.set(tile_x, y, TileType::Floor);
            }
        }
    }
}

/// Coarse detail pass: floor tiles that read in the obstacle band of a
/// low-octave noise surface become obstacles.
fn overlay_obstacles(grid: &mut TileGrid, config: &GenerationConfig, rng: &mut ChaCha8Rng) {
    let noise = PerlinNoise::new(next_noise_seed(rng));

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.get(x, y) != Some(TileType::Floor) {
                continue;
            }
            let value = noise.fbm(
                f64::from(x) * OVERLAY_SCALE,
                f64::from(y) * OVERLAY_SCALE,
                OVERLAY_OCTAVES,
                config.persistence,
                config.lacunarity,
            );
            if band_for(value) == TileType::Obstacle {
                grid.set(x, y, TileType::Obstacle);
            }
        }
    }
}
