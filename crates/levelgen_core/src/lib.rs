//! # Levelgen Core
//!
//! Deterministic procedural level generation and object placement.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No system randomness when a seed is supplied
//!
//! The same [`config::GenerationConfig`] with the same seed always
//! produces the identical level and object layout, which enables
//! reproducible content pipelines and regression testing.
//!
//! ## Crate Structure
//!
//! - [`grid`] - Tile grid storage and tile semantics
//! - [`config`] - Generation parameters and scenario input
//! - [`strategies`] - Interchangeable generation algorithms
//! - [`generator`] - Level assembly pipeline
//! - [`pathfinding`] - A* player path analysis
//! - [`difficulty`] / [`visibility`] - Per-tile scalar field analyzers
//! - [`placement`] - Multi-criteria object placement

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod difficulty;
pub mod error;
pub mod field;
pub mod generator;
pub mod grid;
pub mod noise;
pub mod objects;
pub mod pathfinding;
pub mod placement;
pub mod strategies;
pub mod visibility;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Algorithm, GenerationConfig, ScenarioInput};
    pub use crate::difficulty::DifficultyZoneAnalyzer;
    pub use crate::error::{GenError, Result};
    pub use crate::field::ScalarField;
    pub use crate::generator::{GeneratedLevel, LevelGenerator};
    pub use crate::grid::{TileGrid, TileType};
    pub use crate::objects::{GameObject, ObjectType, PlacementRule};
    pub use crate::pathfinding::{find_path, Path, PathAnalyzer};
    pub use crate::placement::{
        FeatureWeights, ObjectPlacementEngine, PlacementContext, PlacementOptimizer,
    };
    pub use crate::visibility::VisibilityAnalyzer;
}
