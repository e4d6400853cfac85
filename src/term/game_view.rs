//! Game view - board state to styled terminal lines.

use crossterm::style::{Color, Stylize};

use crate::core::{Game, Tile};
use crate::types::{Position, TileKind};

/// Renders a game as a list of terminal lines, one cell per tile with the
/// cursor cell bracketed.
#[derive(Debug, Default)]
pub struct GameView;

impl GameView {
    pub fn render(&self, game: &Game, cursor: Position, status: &str) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(
            format!("tilefall ({})  score {}", game.mode().name(), game.score())
                .bold()
                .to_string(),
        );
        lines.push(String::new());

        let (rows, columns) = game.board().size();
        for row in 0..rows {
            let mut line = String::new();
            for column in 0..columns {
                let position = (row, column);
                line.push_str(&cell_text(game.board().tile(position), position == cursor));
            }
            lines.push(line);
        }

        lines.push(String::new());
        lines.push(status.to_string());
        lines.push(
            "arrows move | enter joins | r reset | a animation | q quit"
                .dark_grey()
                .to_string(),
        );
        lines
    }
}

fn cell_text(tile: Option<&Tile>, selected: bool) -> String {
    let body = match tile {
        Some(tile) => match tile.display_value() {
            Some(value) => format!("{value:^4}"),
            None => " .  ".to_string(),
        },
        None => "    ".to_string(),
    };
    let styled = match tile {
        Some(tile) => body.with(tile_color(tile)).to_string(),
        None => body,
    };
    if selected {
        format!("[{styled}]")
    } else {
        format!(" {styled} ")
    }
}

fn tile_color(tile: &Tile) -> Color {
    if tile.disabled() {
        return Color::DarkGrey;
    }
    match tile.kind() {
        TileKind::Max => Color::White,
        TileKind::Basic(n) => match n % 6 {
            1 => Color::Red,
            2 => Color::Green,
            3 => Color::Blue,
            4 => Color::Yellow,
            5 => Color::Magenta,
            _ => Color::Cyan,
        },
    }
}
