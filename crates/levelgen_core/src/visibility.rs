//! Per-tile visibility field from sampled sightlines.
//!
//! Approximates how often a tile falls inside probable player
//! sightlines: for a few representative paths, rays are cast from
//! every second waypoint and each traversed tile's accumulator is
//! incremented. Placement uses the result to bias trap concealment
//! and loot prominence.

use crate::field::ScalarField;
use crate::generator::GeneratedLevel;
use crate::grid::TileType;
use crate::pathfinding::Path;

/// Number of representative paths sampled.
const MAX_PATHS: usize = 3;
/// Angular step between rays, in degrees.
const RAY_STEP_DEGREES: u32 = 5;
/// Sightline radius in tiles.
const FOV_RADIUS: u32 = 7;

/// Sightline frequency estimation along analyzed paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityAnalyzer;

impl VisibilityAnalyzer {
    /// Build the visibility field for a level.
    ///
    /// With no paths the field degrades to all-zero rather than
    /// failing.
    #[must_use]
    pub fn compute_visibility_map(&self, level: &GeneratedLevel, paths: &[Path]) -> ScalarField {
        let mut field = ScalarField::zeros(level.width, level.height);

        for path in paths.iter().take(MAX_PATHS) {
            for &waypoint in path.iter().step_by(2) {
                cast_field_of_view(level, waypoint, &mut field);
            }
        }

        field.max_normalize();
        field
    }
}

/// Cast rays at fixed angular increments; each ray stops at the first
/// wall tile or the grid edge, incrementing every tile it traverses.
fn cast_field_of_view(level: &GeneratedLevel, center: (u32, u32), field: &mut ScalarField) {
    let (cx, cy) = (f64::from(center.0), f64::from(center.1));

    for angle in (0..360).step_by(RAY_STEP_DEGREES as usize) {
        let radians = f64::from(angle).to_radians();
        let (dx, dy) = (radians.cos(), radians.sin());

        for step in 1..=FOV_RADIUS {
            let x = cx + dx * f64::from(step);
            let y = cy + dy * f64::from(step);
            if x < 0.0 || y < 0.0 {
                break;
            }
            let (tx, ty) = (x as u32, y as u32);
            match level.tiles.get(tx, ty) {
                None | Some(TileType::Wall) => break,
                Some(_) => field.add(tx, ty, 1.0),
            }
        }
    }
}
