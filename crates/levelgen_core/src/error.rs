//! Error types for level generation and object placement.

use thiserror::Error;

/// Result type alias using [`GenError`].
pub type Result<T> = std::result::Result<T, GenError>;

/// Top-level error type for all generation errors.
///
/// Placement shortfalls and unreachable spawn/goal pairs are *not*
/// errors; they surface as shorter result collections instead.
#[derive(Debug, Error)]
pub enum GenError {
    /// Algorithm tag did not match any registered strategy.
    #[error("Unknown generation algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Level dimensions must both be positive.
    #[error("Invalid level dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in tiles.
        width: u32,
        /// Requested height in tiles.
        height: u32,
    },

    /// Unexpected internal failure while building a grid.
    /// No partial grid is returned.
    #[error("Level generation failed: {0}")]
    Generation(String),

    /// Failed to encode the generation parameter snapshot.
    #[error("Failed to encode level metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}
