//! Terminal runner (default binary).
//!
//! Drives a game with crossterm: the arrow keys move a cell cursor, enter
//! activates the group under it, and a fixed timer pulls one resolution
//! step per tick so drops animate.

use std::io::{stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use tilefall::core::{Game, Lucky7Options, Make13Options, RegularOptions, UnlimitedOptions};
use tilefall::term::GameView;
use tilefall::types::{GameEvent, Position};

/// Delay between resolution steps (one gravity frame per tick).
const STEP_MS: u64 = 150;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut game = game_from_args(&args)?;

    terminal::enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, Hide)?;

    let result = run(&mut game);

    // Always try to restore terminal state.
    let _ = execute!(stdout(), Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    result
}

fn game_from_args(args: &[String]) -> Result<Game> {
    let seed = rand::random::<u64>();
    let mode = args.first().map(String::as_str).unwrap_or("regular");
    match mode {
        "regular" => Ok(Game::regular(RegularOptions {
            seed,
            ..RegularOptions::default()
        })),
        "make13" => Ok(Game::make13(Make13Options {
            seed,
            ..Make13Options::default()
        })),
        "lucky7" => Ok(Game::lucky7(Lucky7Options {
            seed,
            ..Lucky7Options::default()
        })),
        "unlimited" => Ok(Game::unlimited(UnlimitedOptions {
            seed,
            ..UnlimitedOptions::default()
        })),
        other => Err(anyhow!(
            "unknown game mode: {} (expected regular, make13, lucky7 or unlimited)",
            other
        )),
    }
}

fn run(game: &mut Game) -> Result<()> {
    let view = GameView;
    let mut cursor: Position = (0, 0);
    let mut status = String::from("pick a group and press enter");
    let step_duration = Duration::from_millis(STEP_MS);
    let mut last_step = Instant::now();

    loop {
        draw(&view, game, cursor, &status)?;

        // Input with timeout until the next step tick.
        let timeout = step_duration
            .checked_sub(last_step.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let (rows, columns) = game.board().size();
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Up => cursor.0 = cursor.0.saturating_sub(1),
                        KeyCode::Down => cursor.0 = (cursor.0 + 1).min(rows - 1),
                        KeyCode::Left => cursor.1 = cursor.1.saturating_sub(1),
                        KeyCode::Right => cursor.1 = (cursor.1 + 1).min(columns - 1),
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            // Too-small groups and mid-resolution presses
                            // are simply ignored.
                            let _ = game.activate(cursor);
                        }
                        KeyCode::Char('r') => {
                            game.reset();
                            status = String::from("pick a group and press enter");
                        }
                        KeyCode::Char('a') => {
                            let on = game.toggle_animation();
                            status = format!("animation {}", if on { "on" } else { "off" });
                        }
                        _ => {}
                    }
                }
            }
        }

        // Step tick: advance an in-flight resolution by one frame.
        if last_step.elapsed() >= step_duration {
            last_step = Instant::now();
            if game.is_resolving() {
                game.step();
            }
        }

        for event in game.take_events() {
            match event {
                GameEvent::Score(score) => status = format!("score {score}"),
                GameEvent::Resolved => {}
                GameEvent::GameOver => status = String::from("game over, press r to restart"),
            }
        }
    }
}

fn draw(view: &GameView, game: &Game, cursor: Position, status: &str) -> Result<()> {
    let mut out = stdout();
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    for (i, line) in view.render(game, cursor, status).iter().enumerate() {
        queue!(out, MoveTo(0, i as u16))?;
        write!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}
