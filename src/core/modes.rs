//! Game mode policies
//!
//! Each mode is a tagged variant supplying the tile factory, the initial
//! weight table, and the scoring/unlock/goal rules the engine dispatches on.
//! Mode-specific construction defaults live in the options structs.

use crate::core::tile::TileFactory;
use crate::types::{
    TileKind, DEFAULT_BASIC_TYPES, DEFAULT_COLUMNS, DEFAULT_GOAL_VALUE, DEFAULT_INITIAL_TILES,
    DEFAULT_LUCKY_VALUE, DEFAULT_MAX_VALUE, DEFAULT_MAX_WEIGHT, DEFAULT_MIN_GROUP,
    DEFAULT_NORMAL_WEIGHT, DEFAULT_ROWS, MAKE13_MIN_GROUP, UNLIMITED_BASIC_TYPES,
    UNLIMITED_COLUMNS, UNLIMITED_ROWS,
};

/// Weight of a level-variant tile: lower values are exponentially likelier.
pub fn level_weight(goal_value: u32, value: u32) -> f64 {
    2f64.powi(goal_value as i32 - value as i32)
}

/// Active mode and its mutable policy state.
#[derive(Debug, Clone, PartialEq)]
pub enum GameMode {
    Regular {
        types: u32,
        max_value: u32,
        normal_weight: f64,
        max_weight: f64,
        /// Whether the max kind has been added to the generator weights.
        max_unlocked: bool,
    },
    Make13 {
        initial_tiles: u32,
        goal_value: u32,
    },
    Lucky7 {
        initial_tiles: u32,
        lucky_value: u32,
    },
    Unlimited {
        types: u32,
        normal_weight: f64,
    },
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Regular { .. } => "regular",
            GameMode::Make13 { .. } => "make13",
            GameMode::Lucky7 { .. } => "lucky7",
            GameMode::Unlimited { .. } => "unlimited",
        }
    }

    /// The tile construction function this mode binds.
    pub fn factory(&self) -> TileFactory {
        match *self {
            GameMode::Regular { max_value, .. } => TileFactory::Regular {
                max_value: Some(max_value),
            },
            GameMode::Make13 { .. } => TileFactory::Level,
            GameMode::Lucky7 { lucky_value, .. } => TileFactory::Lucky { lucky_value },
            GameMode::Unlimited { .. } => TileFactory::Regular { max_value: None },
        }
    }

    /// The generator weight table in its locked (freshly reset) state.
    pub fn initial_weights(&self) -> Vec<(TileKind, f64)> {
        match *self {
            GameMode::Regular {
                types,
                normal_weight,
                ..
            }
            | GameMode::Unlimited {
                types,
                normal_weight,
            } => (1..=types)
                .map(|kind| (TileKind::Basic(kind), normal_weight))
                .collect(),
            GameMode::Make13 {
                initial_tiles,
                goal_value,
            } => (1..=initial_tiles)
                .map(|value| (TileKind::Basic(value), level_weight(goal_value, value)))
                .collect(),
            GameMode::Lucky7 {
                initial_tiles,
                lucky_value,
            } => (1..=initial_tiles)
                .map(|value| {
                    (
                        TileKind::Basic(value),
                        level_weight(lucky_value + 1, value),
                    )
                })
                .collect(),
        }
    }
}

/// Construction options for a regular game.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularOptions {
    pub rows: usize,
    pub columns: usize,
    pub types: u32,
    pub min_group: usize,
    pub max_value: u32,
    pub normal_weight: f64,
    pub max_weight: f64,
    pub animation: bool,
    pub seed: u64,
}

impl Default for RegularOptions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            types: DEFAULT_BASIC_TYPES,
            min_group: DEFAULT_MIN_GROUP,
            max_value: DEFAULT_MAX_VALUE,
            normal_weight: DEFAULT_NORMAL_WEIGHT,
            max_weight: DEFAULT_MAX_WEIGHT,
            animation: true,
            seed: 1,
        }
    }
}

/// Construction options for a make-13 game.
#[derive(Debug, Clone, PartialEq)]
pub struct Make13Options {
    pub rows: usize,
    pub columns: usize,
    pub initial_tiles: u32,
    pub goal_value: u32,
    pub min_group: usize,
    pub animation: bool,
    pub seed: u64,
}

impl Default for Make13Options {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            initial_tiles: DEFAULT_INITIAL_TILES,
            goal_value: DEFAULT_GOAL_VALUE,
            min_group: MAKE13_MIN_GROUP,
            animation: true,
            seed: 1,
        }
    }
}

/// Construction options for a lucky-7 game.
#[derive(Debug, Clone, PartialEq)]
pub struct Lucky7Options {
    pub rows: usize,
    pub columns: usize,
    pub initial_tiles: u32,
    pub lucky_value: u32,
    pub min_group: usize,
    pub animation: bool,
    pub seed: u64,
}

impl Default for Lucky7Options {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            initial_tiles: DEFAULT_INITIAL_TILES,
            lucky_value: DEFAULT_LUCKY_VALUE,
            min_group: DEFAULT_MIN_GROUP,
            animation: true,
            seed: 1,
        }
    }
}

/// Construction options for an unlimited game.
#[derive(Debug, Clone, PartialEq)]
pub struct UnlimitedOptions {
    pub rows: usize,
    pub columns: usize,
    pub types: u32,
    pub min_group: usize,
    pub animation: bool,
    pub seed: u64,
}

impl Default for UnlimitedOptions {
    fn default() -> Self {
        Self {
            rows: UNLIMITED_ROWS,
            columns: UNLIMITED_COLUMNS,
            types: UNLIMITED_BASIC_TYPES,
            min_group: DEFAULT_MIN_GROUP,
            animation: true,
            seed: 1,
        }
    }
}
