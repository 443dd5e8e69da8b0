use crate::unit::UnitKind;
use thiserror::Error;

/// Errors raised while building or loading a colony world
#[derive(Error, Debug)]
pub enum SimError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid line in a terrain map
    #[error("Invalid line: {0}")]
    InvalidLine(String),

    /// Unknown glyph in a terrain map
    #[error("Invalid tile glyph: {0:?}")]
    InvalidTile(char),

    /// Grid with a zero-sized dimension
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Turn weights that do not fit in 1000 permille
    #[error("Invalid river parameters: {0}")]
    InvalidRiverParams(String),

    /// Explicit placement onto water or an occupied tile
    #[error("Tile ({x}, {y}) is not walkable")]
    TileNotWalkable { x: usize, y: usize },

    /// No free Dirt tile left for a required spawn
    #[error("No walkable tile left to place a {kind:?} ({placed} units already placed)")]
    NoWalkableTile { kind: UnitKind, placed: usize },
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, SimError>;
