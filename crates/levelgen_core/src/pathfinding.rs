//! Player path analysis using A* over the tile grid.
//!
//! Read-only analysis: never mutates the level. A spawn/goal pair with
//! no connecting path simply contributes no entry, it is not an error.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::generator::GeneratedLevel;
use crate::grid::TileGrid;

/// A path as a sequence of grid coordinates, spawn first.
pub type Path = Vec<(u32, u32)>;

/// Cost of a diagonal step.
const DIAGONAL_COST: f32 = std::f32::consts::SQRT_2;

/// Direction offsets for 8-directional movement.
const DIRECTIONS: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// A node in the A* open set priority queue.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    x: u32,
    y: u32,
    f_score: f32,
    /// Deterministic tie-break when f-scores are equal: lower (y, x)
    /// first, so repeated runs expand nodes in the same order.
    tie_breaker: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse for lowest f-score first.
        match other.f_score.total_cmp(&self.f_score) {
            Ordering::Equal => other.tie_breaker.cmp(&self.tie_breaker),
            ord => ord,
        }
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[inline]
fn coords_to_tie_breaker(x: u32, y: u32) -> u64 {
    (u64::from(y) << 32) | u64::from(x)
}

/// Manhattan distance heuristic. Admissible relative to the diagonal
/// step cost used here, and matches the original scoring.
#[inline]
fn manhattan_heuristic(x1: u32, y1: u32, x2: u32, y2: u32) -> f32 {
    (x1.abs_diff(x2) + y1.abs_diff(y2)) as f32
}

/// Best-effort player path analysis between spawn and goal points.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathAnalyzer;

impl PathAnalyzer {
    /// One path per (spawn, goal) pair that is connected; unreachable
    /// pairs are skipped.
    #[must_use]
    pub fn find_player_paths(&self, level: &GeneratedLevel) -> Vec<Path> {
        let mut paths = Vec::new();
        for &spawn in &level.spawn_points {
            for &goal in &level.goal_points {
                if let Some(path) = find_path(&level.tiles, spawn, goal) {
                    paths.push(path);
                }
            }
        }
        tracing::debug!(
            pairs = level.spawn_points.len() * level.goal_points.len(),
            found = paths.len(),
            "player path analysis complete"
        );
        paths
    }
}

/// A* over 8-connected walkable tiles. Returns `None` when start and
/// goal are not connected (or either is not walkable).
#[must_use]
pub fn find_path(grid: &TileGrid, start: (u32, u32), goal: (u32, u32)) -> Option<Path> {
    let (start_x, start_y) = start;
    let (goal_x, goal_y) = goal;

    if !grid.is_walkable(start_x, start_y) || !grid.is_walkable(goal_x, goal_y) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut open_set: BinaryHeap<OpenNode> = BinaryHeap::new();
    let mut came_from: HashMap<(u32, u32), (u32, u32)> = HashMap::new();
    let mut g_score: HashMap<(u32, u32), f32> = HashMap::new();

    let _ = g_score.insert(start, 0.0);
    open_set.push(OpenNode {
        x: start_x,
        y: start_y,
        f_score: manhattan_heuristic(start_x, start_y, goal_x, goal_y),
        tie_breaker: coords_to_tie_breaker(start_x, start_y),
    });

    while let Some(current) = open_set.pop() {
        if current.x == goal_x && current.y == goal_y {
            return Some(reconstruct_path(&came_from, goal));
        }

        let current_g = g_score
            .get(&(current.x, current.y))
            .copied()
            .unwrap_or(f32::INFINITY);

        for &(dx, dy) in &DIRECTIONS {
            let nx = current.x as i64 + dx;
            let ny = current.y as i64 + dy;
            if nx < 0 || ny < 0 {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if !grid.is_walkable(nx, ny) {
                continue;
            }

            let step_cost = if dx != 0 && dy != 0 { DIAGONAL_COST } else { 1.0 };
            let tentative_g = current_g + step_cost;
            let neighbor_g = g_score.get(&(nx, ny)).copied().unwrap_or(f32::INFINITY);

            if tentative_g < neighbor_g {
                let _ = came_from.insert((nx, ny), (current.x, current.y));
                let _ = g_score.insert((nx, ny), tentative_g);
                open_set.push(OpenNode {
                    x: nx,
                    y: ny,
                    f_score: tentative_g + manhattan_heuristic(nx, ny, goal_x, goal_y),
                    tie_breaker: coords_to_tie_breaker(nx, ny),
                });
            }
        }
    }

    None
}

fn reconstruct_path(came_from: &HashMap<(u32, u32), (u32, u32)>, goal: (u32, u32)) -> Path {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
