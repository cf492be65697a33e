//! Multi-criteria object placement.
//!
//! [`ObjectPlacementEngine`] derives per-type object counts from the
//! walkable area and genre, runs the path/difficulty/visibility
//! analyzers once, and hands the shared [`PlacementContext`] to the
//! [`PlacementOptimizer`], which scores candidate tiles against a
//! weighted feature set and greedily accepts the best under spacing
//! constraints. A count that cannot be met on the available tiles is
//! satisfied partially, never padded with rule-violating positions.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;

use crate::config::ScenarioInput;
use crate::difficulty::DifficultyZoneAnalyzer;
use crate::field::ScalarField;
use crate::generator::GeneratedLevel;
use crate::objects::{
    default_rules, GameObject, ObjectType, PlacementRule, DEFAULT_INFLUENCE_RADIUS,
};
use crate::pathfinding::{Path, PathAnalyzer};
use crate::visibility::VisibilityAnalyzer;

/// Preferred distance from the player path, in tiles.
const IDEAL_PATH_DISTANCE: f32 = 3.0;
/// Sigmoid width of the path-distance score falloff.
const PATH_DISTANCE_FALLOFF: f32 = 2.0;
/// Half-width of the window scanned for the nearest wall.
const WALL_SCAN_RADIUS: i64 = 5;
/// Wall distance assumed when no wall is inside the scan window.
const OPEN_AREA_WALL_DISTANCE: f32 = 5.0;
/// Divisor normalizing neighbor distance for the clustering score.
const CLUSTER_DISTANCE_SCALE: f32 = 10.0;
/// Goal distance beyond which the ambush score bottoms out.
const AMBUSH_RANGE: f32 = 10.0;
/// Spawn distance at which the early-reward score saturates.
const EARLY_REWARD_RANGE: f32 = 5.0;

/// Shared read-only inputs for one placement run.
///
/// Built once per level so every object type scores against the same
/// paths and fields.
#[derive(Debug)]
pub struct PlacementContext<'a> {
    /// The level being furnished.
    pub level: &'a GeneratedLevel,
    /// Lowercased genre tag driving property flavor.
    pub genre: String,
    /// Analyzed spawn-to-goal paths.
    pub paths: Vec<Path>,
    /// Normalized per-tile difficulty.
    pub difficulty: ScalarField,
    /// Normalized per-tile visibility.
    pub visibility: ScalarField,
}

impl PlacementContext<'_> {
    /// The path used for distance scoring; the first found, if any.
    #[must_use]
    pub fn primary_path(&self) -> Option<&Path> {
        self.paths.first()
    }
}

/// Relative weight of each placement feature. Sums to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureWeights {
    /// Closeness to the ideal path distance.
    pub distance_to_path: f32,
    /// Match between tile difficulty and the type's preference.
    pub difficulty: f32,
    /// Match between tile visibility and the type's preference.
    pub visibility: f32,
    /// Agreement with the type's clustering preference.
    pub clustering: f32,
    /// Strategic value (ambush or early-reward position).
    pub strategic: f32,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            distance_to_path: 0.30,
            difficulty: 0.25,
            visibility: 0.20,
            clustering: 0.15,
            strategic: 0.10,
        }
    }
}

/// Scores candidate tiles and greedily selects placements.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementOptimizer {
    weights: FeatureWeights,
}

impl PlacementOptimizer {
    /// Optimizer with non-default feature weights.
    #[must_use]
    pub fn with_weights(weights: FeatureWeights) -> Self {
        Self { weights }
    }

    /// Place the requested number of objects per type.
    ///
    /// Types are processed in `counts` iteration order; objects already
    /// accepted inform the clustering score of later types. Returns
    /// fewer objects than requested when constraints exhaust the
    /// candidate tiles.
    #[must_use]
    pub fn optimize_placement(
        &self,
        context: &PlacementContext<'_>,
        counts: &BTreeMap<ObjectType, usize>,
        rules: &BTreeMap<ObjectType, PlacementRule>,
        rng: &mut ChaCha8Rng,
    ) -> Vec<GameObject> {
        let mut placed: Vec<GameObject> = Vec::new();

        for (&object_type, &count) in counts {
            if count == 0 {
                continue;
            }
            let rule = rules
                .get(&object_type)
                .cloned()
                .unwrap_or_else(|| PlacementRule::for_type(object_type));

            let accepted = self.place_type(context, object_type, count, &rule, &placed, rng);
            if accepted.len() < count {
                tracing::debug!(
                    object_type = %object_type,
                    requested = count,
                    placed = accepted.len(),
                    "placement constraints limited object count"
                );
            }
            placed.extend(accepted);
        }

        tracing::info!(objects = placed.len(), "object placement complete");
        placed
    }

    fn place_type(
        &self,
        context: &PlacementContext<'_>,
        object_type: ObjectType,
        count: usize,
        rule: &PlacementRule,
        already_placed: &[GameObject],
        rng: &mut ChaCha8Rng,
    ) -> Vec<GameObject> {
        let mut scored: Vec<(f32, (u32, u32))> = candidate_tiles(context.level, rule)
            .into_iter()
            .map(|pos| {
                let score = self.score_position(context, pos, object_type, rule, already_placed);
                (score, pos)
            })
            .collect();

        // Stable sort over row-major candidates keeps equal scores in a
        // deterministic order.
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut accepted: Vec<GameObject> = Vec::with_capacity(count);
        let occupied: Vec<(u32, u32)> = already_placed.iter().map(|o| o.position).collect();

        for (_, pos) in scored {
            if accepted.len() == count {
                break;
            }
            if occupied.contains(&pos) || accepted.iter().any(|o| o.position == pos) {
                continue;
            }
            let spacing_ok = accepted
                .iter()
                .all(|o| euclidean(o.position, pos) >= rule.min_distance_from_same_type);
            if !spacing_ok {
                continue;
            }

            let id = format!("{}_{}", object_type.as_str(), accepted.len() + 1);
            accepted.push(GameObject {
                id,
                object_type,
                position: pos,
                properties: generate_properties(object_type, &context.genre, rng),
                influence_radius: DEFAULT_INFLUENCE_RADIUS,
                rule: rule.clone(),
            });
        }

        accepted
    }

    fn score_position(
        &self,
        context: &PlacementContext<'_>,
        pos: (u32, u32),
        object_type: ObjectType,
        rule: &PlacementRule,
        already_placed: &[GameObject],
    ) -> f32 {
        let w = &self.weights;
        w.distance_to_path * path_distance_score(context, pos)
            + w.difficulty * difficulty_score(context, pos, object_type)
            + w.visibility * visibility_score(context, pos, object_type)
            + w.clustering * clustering_score(pos, rule, already_placed)
            + w.strategic * strategic_score(context, pos, object_type, rule)
    }
}

/// Walkable tiles passing the rule's tile and wall-distance filters,
/// in row-major order.
fn candidate_tiles(level: &GeneratedLevel, rule: &PlacementRule) -> Vec<(u32, u32)> {
    let mut candidates = Vec::new();
    for y in 0..level.height {
        for x in 0..level.width {
            let Some(tile) = level.tiles.get(x, y) else {
                continue;
            };
            if !tile.is_walkable() || rule.forbidden_tiles.contains(&tile) {
                continue;
            }
            if !rule.preferred_tiles.is_empty() && !rule.preferred_tiles.contains(&tile) {
                continue;
            }
            if wall_distance(level, (x, y)) < rule.min_distance_from_walls {
                continue;
            }
            candidates.push((x, y));
        }
    }
    candidates
}

/// Distance to the nearest wall within the scan window; tiles in large
/// open areas read as `OPEN_AREA_WALL_DISTANCE`.
fn wall_distance(level: &GeneratedLevel, pos: (u32, u32)) -> f32 {
    let (px, py) = (i64::from(pos.0), i64::from(pos.1));
    let mut nearest = f32::INFINITY;

    for dy in -WALL_SCAN_RADIUS..=WALL_SCAN_RADIUS {
        for dx in -WALL_SCAN_RADIUS..=WALL_SCAN_RADIUS {
            if let Some(tile) = level.tiles.get_signed(px + dx, py + dy) {
                if tile == crate::grid::TileType::Wall {
                    let dist = ((dx * dx + dy * dy) as f32).sqrt();
                    nearest = nearest.min(dist);
                }
            }
        }
    }

    if nearest.is_finite() {
        nearest
    } else {
        OPEN_AREA_WALL_DISTANCE
    }
}

fn euclidean(a: (u32, u32), b: (u32, u32)) -> f32 {
    let dx = f64::from(a.0) - f64::from(b.0);
    let dy = f64::from(a.1) - f64::from(b.1);
    (dx * dx + dy * dy).sqrt() as f32
}

/// Peaks at `IDEAL_PATH_DISTANCE` tiles from the primary path and
/// falls off smoothly on both sides. Neutral when no path exists.
fn path_distance_score(context: &PlacementContext<'_>, pos: (u32, u32)) -> f32 {
    let Some(path) = context.primary_path() else {
        return 0.5;
    };
    let nearest = path
        .iter()
        .map(|&waypoint| euclidean(pos, waypoint))
        .fold(f32::INFINITY, f32::min);
    if !nearest.is_finite() {
        return 0.5;
    }
    1.0 / (1.0 + ((nearest - IDEAL_PATH_DISTANCE).abs() / PATH_DISTANCE_FALLOFF).exp())
}

/// Enemies seek difficult tiles; everything else prefers calm ones.
fn difficulty_score(context: &PlacementContext<'_>, pos: (u32, u32), object_type: ObjectType) -> f32 {
    let d = context.difficulty.get(pos.0, pos.1);
    if object_type == ObjectType::Enemy {
        d
    } else {
        1.0 - d
    }
}

/// Traps hide in low visibility; everything else wants to be seen.
fn visibility_score(context: &PlacementContext<'_>, pos: (u32, u32), object_type: ObjectType) -> f32 {
    let v = context.visibility.get(pos.0, pos.1);
    if object_type == ObjectType::Trap {
        1.0 - v
    } else {
        v
    }
}

/// Agreement between the tile's neighborhood and the rule's clustering
/// preference, measured against every object placed so far.
fn clustering_score(pos: (u32, u32), rule: &PlacementRule, already_placed: &[GameObject]) -> f32 {
    if already_placed.is_empty() {
        return 0.5;
    }
    let total: f32 = already_placed
        .iter()
        .map(|o| euclidean(o.position, pos))
        .sum();
    let avg = total / already_placed.len() as f32;
    let normalized_distance = (avg / CLUSTER_DISTANCE_SCALE).min(1.0);

    let pref = rule.clustering_preference;
    pref * (1.0 - normalized_distance) + (1.0 - pref) * normalized_distance
}

/// Ambush value near goals for threats, early-reward value near spawns
/// for pickups; neutral for other types. Scaled by the rule's
/// strategic importance.
fn strategic_score(
    context: &PlacementContext<'_>,
    pos: (u32, u32),
    object_type: ObjectType,
    rule: &PlacementRule,
) -> f32 {
    let base = match object_type {
        ObjectType::Enemy | ObjectType::Trap => {
            let nearest_goal = context
                .level
                .goal_points
                .iter()
                .map(|&g| euclidean(pos, g))
                .fold(f32::INFINITY, f32::min);
            if nearest_goal.is_finite() {
                (AMBUSH_RANGE - nearest_goal.min(AMBUSH_RANGE)) / AMBUSH_RANGE
            } else {
                0.5
            }
        }
        ObjectType::Item | ObjectType::Checkpoint => {
            let nearest_spawn = context
                .level
                .spawn_points
                .iter()
                .map(|&s| euclidean(pos, s))
                .fold(f32::INFINITY, f32::min);
            if nearest_spawn.is_finite() {
                (nearest_spawn / EARLY_REWARD_RANGE).min(1.0)
            } else {
                0.5
            }
        }
        _ => 0.5,
    };
    base * rule.strategic_importance
}

/// Type-flavored randomized properties. Every object also records the
/// genre it was generated for.
fn generate_properties(
    object_type: ObjectType,
    genre: &str,
    rng: &mut ChaCha8Rng,
) -> BTreeMap<String, Value> {
    let mut props = BTreeMap::new();

    match object_type {
        ObjectType::Enemy => {
            let ai_types = ["patrol", "guard", "aggressive"];
            let _ = props.insert("health".into(), Value::from(rng.gen_range(50..=150)));
            let _ = props.insert("damage".into(), Value::from(rng.gen_range(10..=30)));
            let _ = props.insert(
                "ai_type".into(),
                Value::from(*ai_types.choose(rng).unwrap_or(&"patrol")),
            );
            let _ = props.insert(
                "detection_range".into(),
                Value::from(f64::from(rng.gen_range(3.0_f32..7.0))),
            );
        }
        ObjectType::Item => {
            let item_types = ["weapon", "armor", "consumable", "key"];
            let item_type = *item_types.choose(rng).unwrap_or(&"consumable");
            let _ = props.insert("item_type".into(), Value::from(item_type));
            let _ = props.insert("value".into(), Value::from(rng.gen_range(10..=100)));
            let _ = props.insert("stackable".into(), Value::from(item_type == "consumable"));
        }
        ObjectType::Trap => {
            let trap_types = ["spike", "poison", "explosive", "alarm"];
            let _ = props.insert(
                "trap_type".into(),
                Value::from(*trap_types.choose(rng).unwrap_or(&"spike")),
            );
            let _ = props.insert("damage".into(), Value::from(rng.gen_range(20..=50)));
            let _ = props.insert(
                "detection_difficulty".into(),
                Value::from(f64::from(rng.gen_range(0.3_f32..0.8))),
            );
        }
        ObjectType::Treasure => {
            let treasure_types = ["gold", "gems", "artifact"];
            let _ = props.insert(
                "treasure_type".into(),
                Value::from(*treasure_types.choose(rng).unwrap_or(&"gold")),
            );
            let _ = props.insert("value".into(), Value::from(rng.gen_range(100..=500)));
            let _ = props.insert("hidden".into(), Value::from(rng.gen::<bool>()));
        }
        _ => {}
    }

    let _ = props.insert("genre".into(), Value::from(genre));
    props
}

/// Fraction of walkable tiles allotted to each object type, with a
/// per-type floor.
const BASE_DENSITIES: [(ObjectType, f32, usize); 5] = [
    (ObjectType::Enemy, 0.05, 1),
    (ObjectType::Item, 0.08, 2),
    (ObjectType::Trap, 0.03, 1),
    (ObjectType::Treasure, 0.02, 1),
    (ObjectType::Decoration, 0.10, 3),
];

/// Per-genre count multipliers applied on top of the base densities.
fn genre_multiplier(genre: &str, object_type: ObjectType) -> f32 {
    match (genre, object_type) {
        ("cyberpunk", ObjectType::Enemy) => 1.2,
        ("cyberpunk", ObjectType::Trap) => 1.5,
        ("cyberpunk", ObjectType::Item) => 1.1,
        ("horror", ObjectType::Enemy) => 0.8,
        ("horror", ObjectType::Trap) => 2.0,
        ("horror", ObjectType::Item) => 0.7,
        ("fantasy", ObjectType::Treasure) => 1.5,
        ("fantasy", ObjectType::Item) => 1.2,
        _ => 1.0,
    }
}

/// Full placement pipeline for a generated level.
#[derive(Debug, Default)]
pub struct ObjectPlacementEngine {
    optimizer: PlacementOptimizer,
    default_rules: BTreeMap<ObjectType, PlacementRule>,
}

impl ObjectPlacementEngine {
    /// Engine with the shipped rule table and default feature weights.
    #[must_use]
    pub fn new() -> Self {
        Self {
            optimizer: PlacementOptimizer::default(),
            default_rules: default_rules(),
        }
    }

    /// Replace the rule for one object type.
    pub fn set_rule(&mut self, rule: PlacementRule) {
        let _ = self.default_rules.insert(rule.object_type, rule);
    }

    /// Derive per-type object counts from the level's walkable area
    /// and the scenario genre. Every listed type gets at least its
    /// floor count regardless of multipliers.
    #[must_use]
    pub fn derived_counts(
        &self,
        level: &GeneratedLevel,
        genre: &str,
    ) -> BTreeMap<ObjectType, usize> {
        let walkable = level.tiles.walkable_count() as f32;
        let mut counts = BTreeMap::new();

        for (object_type, density, floor) in BASE_DENSITIES {
            let scaled = walkable * density * genre_multiplier(genre, object_type);
            let count = (scaled as usize).max(floor);
            let _ = counts.insert(object_type, count);
        }

        counts
    }

    /// Analyze the level once, then place objects.
    ///
    /// `counts` overrides the derived per-type counts when given.
    /// The result may fall short of the requested counts when spacing
    /// and tile rules exhaust the candidates.
    #[must_use]
    pub fn place_objects(
        &self,
        level: &GeneratedLevel,
        scenario: &ScenarioInput,
        counts: Option<&BTreeMap<ObjectType, usize>>,
        rng: &mut ChaCha8Rng,
    ) -> Vec<GameObject> {
        let genre = scenario.genre.to_lowercase();

        let paths = PathAnalyzer.find_player_paths(level);
        let difficulty = DifficultyZoneAnalyzer.analyze_difficulty_zones(level, &paths);
        let visibility = VisibilityAnalyzer.compute_visibility_map(level, &paths);

        let context = PlacementContext {
            level,
            genre: genre.clone(),
            paths,
            difficulty,
            visibility,
        };

        let derived;
        let counts = match counts {
            Some(explicit) => explicit,
            None => {
                derived = self.derived_counts(level, &genre);
                &derived
            }
        };

        tracing::debug!(genre = %genre, types = counts.len(), "starting object placement");
        self.optimizer
            .optimize_placement(&context, counts, &self.default_rules, rng)
    }
}
