// Error types for snapshot validation and move computation

use crate::types::Coord;

/// A per-turn snapshot that cannot be turned into a board model.
/// Nothing is clamped or guessed: every variant is surfaced to the caller.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Board dimensions must be positive and at most {max_cells} cells, got {width}x{height}")]
    InvalidDimensions {
        width: i32,
        height: i32,
        max_cells: usize,
    },
    #[error("Snake '{snake_id}' has an empty body")]
    EmptyBody { snake_id: String },
    #[error("Snake '{snake_id}' has a body segment out of bounds at {coord}")]
    BodyOutOfBounds { snake_id: String, coord: Coord },
    #[error("Food out of bounds at {coord}")]
    FoodOutOfBounds { coord: Coord },
}

/// Failure of a /move request
#[derive(thiserror::Error, Debug)]
pub enum MoveError {
    #[error("Malformed snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("Move computation failed: {0}")]
    Worker(String),
}
