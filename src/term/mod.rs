//! Terminal front-end.
//!
//! The engine itself is presentation-free; this module is the thin view
//! layer the default binary drives. It reads game state, never mutates it.

mod game_view;

pub use game_view::GameView;
