//! Shared types for the puzzle engine.
//! Pure data types and tuning constants; no game logic lives here.

use thiserror::Error;

/// A (row, column) cell address, top-left origin.
///
/// Validity is relative to a grid's dimensions; a `Position` by itself
/// carries no bounds guarantee.
pub type Position = (usize, usize);

/// Offsets of the four edge-sharing neighbours.
pub const AXIAL_DELTAS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Offsets of the four corner-sharing neighbours.
pub const DIAGONAL_DELTAS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Offsets of all eight surrounding neighbours.
pub const RADIAL_DELTAS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Default board dimensions
pub const DEFAULT_ROWS: usize = 6;
pub const DEFAULT_COLUMNS: usize = 6;
pub const UNLIMITED_ROWS: usize = 8;
pub const UNLIMITED_COLUMNS: usize = 8;

/// Default rule tuning
pub const DEFAULT_MIN_GROUP: usize = 3;
pub const MAKE13_MIN_GROUP: usize = 2;
pub const DEFAULT_BASIC_TYPES: u32 = 3;
pub const UNLIMITED_BASIC_TYPES: u32 = 4;
pub const DEFAULT_MAX_VALUE: u32 = 50;
pub const DEFAULT_NORMAL_WEIGHT: f64 = 20.0;
pub const DEFAULT_MAX_WEIGHT: f64 = 2.0;
pub const DEFAULT_GOAL_VALUE: u32 = 13;
pub const DEFAULT_LUCKY_VALUE: u32 = 7;
pub const DEFAULT_INITIAL_TILES: u32 = 4;

/// Default number of records kept by a high-score table
pub const DEFAULT_TOP_SCORES: usize = 10;

/// Matchability class of a tile.
///
/// `Max` is the saturated kind a regular tile turns into at its value
/// cap. Value-advancing variants derive their kind from their value, so
/// kind equality covers both comparison rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Basic(u32),
    Max,
}

impl TileKind {
    /// Numeric code used by the `(kind, value)` serialization contract.
    /// Basic kinds are their own (nonzero) number; `Max` is 0.
    pub fn code(&self) -> u32 {
        match self {
            TileKind::Basic(n) => *n,
            TileKind::Max => 0,
        }
    }

    /// Inverse of [`TileKind::code`].
    pub fn from_code(code: u32) -> Self {
        if code == 0 {
            TileKind::Max
        } else {
            TileKind::Basic(code)
        }
    }
}

/// Outbound notifications from the engine, drained by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The score changed to the carried value.
    Score(u32),
    /// One activation/removal resolution completed.
    Resolved,
    /// No further activation is possible, or a goal condition fired.
    GameOver,
}

/// What a single resolution step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStep {
    /// One gravity frame was applied (tiles fell, one refill per run).
    Drop,
    /// A combo-maxed tile exploded its surroundings.
    Explode,
    /// The resolution reached its terminal step; the engine is idle again.
    Done,
}

/// Recoverable engine errors. Every failing operation is a no-op on the
/// engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("position {0:?} is out of bounds")]
    InvalidPosition(Position),
    #[error("tile at {0:?} cannot be activated")]
    InvalidActivation(Position),
    #[error("a resolution is already in progress")]
    Resolving,
}
