//! Game object model and placement rules.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::grid::TileType;

/// Placeable object categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    /// Hostile actor.
    Enemy,
    /// Collectible item.
    Item,
    /// High-value loot.
    Treasure,
    /// Hidden hazard.
    Trap,
    /// Non-interactive scenery.
    Decoration,
    /// Usable world object (lever, terminal, ...).
    Interactive,
    /// Narrative objective object.
    QuestObject,
    /// Save/respawn marker.
    Checkpoint,
    /// Light-emitting fixture.
    LightSource,
    /// Combat cover element.
    Cover,
}

impl ObjectType {
    /// String tag used for object ids and serialization.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enemy => "enemy",
            Self::Item => "item",
            Self::Treasure => "treasure",
            Self::Trap => "trap",
            Self::Decoration => "decoration",
            Self::Interactive => "interactive",
            Self::QuestObject => "quest_object",
            Self::Checkpoint => "checkpoint",
            Self::LightSource => "light_source",
            Self::Cover => "cover",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spatial constraints governing legal positions for one object type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRule {
    /// Type the rule applies to.
    pub object_type: ObjectType,
    /// Minimum distance from the nearest wall tile.
    pub min_distance_from_walls: f32,
    /// Minimum spacing between accepted objects of the same type.
    pub min_distance_from_same_type: f32,
    /// Upper spacing bound between objects of the same type.
    pub max_distance_from_same_type: f32,
    /// Tile types the object may occupy; empty means any walkable tile.
    pub preferred_tiles: Vec<TileType>,
    /// Tile types the object must never occupy.
    pub forbidden_tiles: Vec<TileType>,
    /// Target objects per walkable-area unit.
    pub density_per_area: f32,
    /// 0 = avoid clusters, 1 = prefer clusters.
    pub clustering_preference: f32,
    /// Weighting of the strategic-position feature for this type.
    pub strategic_importance: f32,
}

impl PlacementRule {
    /// Baseline rule for a type; per-type tables tighten it.
    #[must_use]
    pub fn for_type(object_type: ObjectType) -> Self {
        Self {
            object_type,
            min_distance_from_walls: 1.0,
            min_distance_from_same_type: 3.0,
            max_distance_from_same_type: 10.0,
            preferred_tiles: vec![TileType::Floor],
            forbidden_tiles: vec![TileType::Wall, TileType::Water],
            density_per_area: 0.1,
            clustering_preference: 0.5,
            strategic_importance: 1.0,
        }
    }
}

/// The shipped per-type rule table. Callers may override entries;
/// types without an entry fall back to [`PlacementRule::for_type`].
#[must_use]
pub fn default_rules() -> BTreeMap<ObjectType, PlacementRule> {
    let mut rules = BTreeMap::new();

    let _ = rules.insert(
        ObjectType::Enemy,
        PlacementRule {
            min_distance_from_walls: 1.5,
            min_distance_from_same_type: 4.0,
            density_per_area: 0.05,
            clustering_preference: 0.3,
            strategic_importance: 1.0,
            ..PlacementRule::for_type(ObjectType::Enemy)
        },
    );
    let _ = rules.insert(
        ObjectType::Item,
        PlacementRule {
            min_distance_from_walls: 1.0,
            min_distance_from_same_type: 3.0,
            density_per_area: 0.08,
            clustering_preference: 0.1,
            strategic_importance: 0.7,
            ..PlacementRule::for_type(ObjectType::Item)
        },
    );
    let _ = rules.insert(
        ObjectType::Trap,
        PlacementRule {
            min_distance_from_walls: 0.5,
            min_distance_from_same_type: 5.0,
            density_per_area: 0.03,
            clustering_preference: 0.0,
            strategic_importance: 0.9,
            ..PlacementRule::for_type(ObjectType::Trap)
        },
    );
    let _ = rules.insert(
        ObjectType::Treasure,
        PlacementRule {
            min_distance_from_walls: 1.0,
            min_distance_from_same_type: 8.0,
            density_per_area: 0.02,
            clustering_preference: 0.0,
            strategic_importance: 1.0,
            ..PlacementRule::for_type(ObjectType::Treasure)
        },
    );

    rules
}

/// A placed game object.
///
/// The position satisfies the type's tile and distance rules at
/// creation time; it is not continuously re-validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    /// Per-type sequential id, e.g. `enemy_1`.
    pub id: String,
    /// Object category.
    pub object_type: ObjectType,
    /// Tile position.
    pub position: (u32, u32),
    /// Type-appropriate generated properties.
    pub properties: BTreeMap<String, Value>,
    /// Gameplay influence radius in tiles.
    pub influence_radius: f32,
    /// Snapshot of the rule the object was placed under.
    pub rule: PlacementRule,
}

/// Default gameplay influence radius in tiles.
pub const DEFAULT_INFLUENCE_RADIUS: f32 = 3.0;
