//! Core module - pure game logic
//!
//! Everything needed to run a game lives here: the grid, the weighted tile
//! generator, the board algorithms, and the mode-parameterized engine. No
//! UI or I/O dependencies.

pub mod board;
pub mod game;
pub mod generator;
pub mod grid;
pub mod modes;
pub mod selector;
pub mod tile;

// Re-export commonly used types
pub use board::{Board, DropRun};
pub use game::Game;
pub use generator::{TileGenerator, WeightedGenerator};
pub use grid::Grid;
pub use modes::{GameMode, Lucky7Options, Make13Options, RegularOptions, UnlimitedOptions};
pub use selector::WeightedSelector;
pub use tile::{Tile, TileBehavior, TileFactory};
