//! Tilefall: a grid-based tile-matching puzzle engine.
//!
//! A board of typed tiles is searched for connected groups. Activating a
//! group joins it into one tile and scores it under the active mode's
//! rules; the holes are then resolved with per-frame gravity and weighted
//! refills. Four game modes layer their policies over the shared engine.
//! The terminal front-end in `term` drives it, and `highscores` persists
//! the top scores.

pub mod core;
pub mod highscores;
pub mod term;
pub mod types;
