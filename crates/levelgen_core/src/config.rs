//! Generation configuration and scenario input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Generation algorithm selector.
///
/// Parsed from its string tag with [`FromStr`]; an unrecognized tag is
/// a configuration error rejected before any grid is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Cave-like structures from cellular automaton smoothing.
    Cellular,
    /// Terrain banding from thresholded coherent noise.
    Noise,
    /// Perfect maze from randomized depth-first carving.
    Maze,
    /// Textured fill from a small 3x3 exemplar pattern library.
    PatternCollapse,
    /// Cellular base with carved rooms, corridors, and a noise overlay.
    Hybrid,
}

impl Algorithm {
    /// All selectable algorithms.
    pub const ALL: [Self; 5] = [
        Self::Cellular,
        Self::Noise,
        Self::Maze,
        Self::PatternCollapse,
        Self::Hybrid,
    ];

    /// String tag used in configuration and metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cellular => "cellular",
            Self::Noise => "noise",
            Self::Maze => "maze",
            Self::PatternCollapse => "pattern_collapse",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = GenError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag {
            "cellular" => Ok(Self::Cellular),
            "noise" => Ok(Self::Noise),
            "maze" => Ok(Self::Maze),
            "pattern_collapse" => Ok(Self::PatternCollapse),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(GenError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Immutable configuration for a single level generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Level width in tiles.
    pub width: u32,
    /// Level height in tiles.
    pub height: u32,
    /// Selected generation algorithm.
    pub algorithm: Algorithm,
    /// Random seed. Generation is deterministic when set.
    pub seed: Option<u64>,

    /// Cellular automaton: probability a cell seeds as wall.
    pub wall_probability: f32,
    /// Cellular automaton: smoothing iteration count.
    pub iterations: u32,

    /// Noise terrain: coordinate scale per tile.
    pub noise_scale: f64,
    /// Noise terrain: octave count for fractal summation.
    pub octaves: u32,
    /// Noise terrain: amplitude falloff per octave.
    pub persistence: f64,
    /// Noise terrain: frequency growth per octave.
    pub lacunarity: f64,

    /// Hybrid: number of rectangular rooms to carve.
    pub room_count: u32,
    /// Hybrid: carved corridor width in tiles.
    pub corridor_width: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            algorithm: Algorithm::Cellular,
            seed: None,
            wall_probability: 0.45,
            iterations: 5,
            noise_scale: 0.1,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            room_count: 5,
            corridor_width: 2,
        }
    }
}

impl GenerationConfig {
    /// Set the level dimensions.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the generation algorithm.
    #[must_use]
    pub const fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations that cannot produce a grid.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidDimensions`] when either dimension is
    /// zero. Runs before any grid is allocated.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GenError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Scenario description consumed from the surrounding content pipeline.
///
/// Only `genre` affects this core; it selects the generation and
/// placement modifier tables. The remaining fields ride along for the
/// narrative pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Narrative genre, matched case-insensitively against modifier tables.
    pub genre: String,
    /// Protagonist description.
    pub hero: String,
    /// Quest objective description.
    pub goal: String,
    /// Output language for the narrative pipeline.
    pub language: String,
}

impl ScenarioInput {
    /// Convenience constructor used by tests and callers that only care
    /// about the genre.
    #[must_use]
    pub fn for_genre(genre: &str) -> Self {
        Self {
            genre: genre.to_string(),
            hero: String::new(),
            goal: String::new(),
            language: "en".to_string(),
        }
    }
}
