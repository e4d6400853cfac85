//! Engine integration tests: activation scenarios across the game modes.

use tilefall::core::{Game, Lucky7Options, Make13Options, RegularOptions, UnlimitedOptions};
use tilefall::highscores::HighScoreStore;
use tilefall::types::{GameError, GameEvent, ResolveStep, TileKind};

fn regular_1x3() -> Game {
    Game::regular(RegularOptions {
        rows: 1,
        columns: 3,
        types: 2,
        min_group: 3,
        animation: false,
        seed: 17,
        ..RegularOptions::default()
    })
}

#[test]
fn test_regular_three_in_a_row_scenario() {
    let mut game = regular_1x3();
    game.load_grid(&[vec![(1, 1), (1, 1), (1, 1)]]).unwrap();

    assert!(game.can_activate((0, 1)));
    game.activate((0, 1)).unwrap();

    // Two joined tiles, no combo: (2 + 1) * 1 points.
    assert_eq!(game.score(), 3);
    assert!(!game.is_resolving());

    let joined = game
        .board()
        .grid()
        .iter()
        .filter_map(|(_, cell)| cell.as_ref())
        .find(|tile| tile.value() == 3)
        .expect("joined tile should remain on the board");
    assert_eq!(joined.kind(), TileKind::Basic(1));
}

#[test]
fn test_undersized_group_reports_and_changes_nothing() {
    let mut game = regular_1x3();
    game.load_grid(&[vec![(1, 1), (2, 1), (1, 1)]]).unwrap();

    let board_before = game.serialize();
    let score_before = game.score();

    assert!(!game.can_activate((0, 1)));
    assert_eq!(
        game.activate((0, 1)),
        Err(GameError::InvalidActivation((0, 1)))
    );

    assert_eq!(game.serialize(), board_before);
    assert_eq!(game.score(), score_before);
    assert!(!game.is_resolving());
}

#[test]
fn test_score_event_precedes_resolved() {
    let mut game = regular_1x3();
    game.load_grid(&[vec![(1, 1), (1, 1), (1, 1)]]).unwrap();
    game.activate((0, 0)).unwrap();

    let events = game.take_events();
    let score_at = events
        .iter()
        .position(|e| matches!(e, GameEvent::Score(_)))
        .expect("score event");
    let resolved_at = events
        .iter()
        .position(|e| *e == GameEvent::Resolved)
        .expect("resolved event");
    assert!(score_at < resolved_at);
}

#[test]
fn test_stepwise_resolution_order() {
    let mut game = Game::regular(RegularOptions {
        rows: 2,
        columns: 3,
        types: 2,
        min_group: 3,
        animation: true,
        seed: 17,
        ..RegularOptions::default()
    });
    game.load_grid(&[
        vec![(1, 1), (1, 1), (1, 1)],
        vec![(2, 1), (2, 1), (1, 1)],
    ])
    .unwrap();

    game.activate((0, 0)).unwrap();
    assert!(game.is_resolving());
    // Scoring is reported eagerly, but resolved only at the terminal step.
    assert!(game
        .take_events()
        .iter()
        .all(|e| matches!(e, GameEvent::Score(_))));

    let mut steps = Vec::new();
    loop {
        let step = game.step().expect("resolution still in flight");
        steps.push(step);
        if step == ResolveStep::Done {
            break;
        }
    }

    assert_eq!(game.step(), None);
    assert!(!game.is_resolving());
    // All drop frames first, one terminal marker last.
    let done_at = steps.iter().position(|s| *s == ResolveStep::Done).unwrap();
    assert_eq!(done_at, steps.len() - 1);
    assert!(steps[..done_at]
        .iter()
        .all(|s| *s == ResolveStep::Drop));
    assert!(game
        .take_events()
        .iter()
        .any(|e| *e == GameEvent::Resolved));
}

#[test]
fn test_activation_rejected_while_resolving() {
    let mut game = Game::regular(RegularOptions {
        rows: 1,
        columns: 3,
        types: 2,
        min_group: 3,
        animation: true,
        seed: 17,
        ..RegularOptions::default()
    });
    game.load_grid(&[vec![(1, 1), (1, 1), (1, 1)]]).unwrap();

    game.activate((0, 1)).unwrap();
    assert_eq!(game.activate((0, 1)), Err(GameError::Resolving));

    while game.step().is_some_and(|step| step != ResolveStep::Done) {}
    assert!(!game.is_resolving());
}

#[test]
fn test_make13_reaching_goal_emits_game_over() {
    let mut game = Game::make13(Make13Options {
        rows: 1,
        columns: 2,
        animation: false,
        seed: 31,
        ..Make13Options::default()
    });
    game.load_grid(&[vec![(12, 12), (12, 12)]]).unwrap();

    game.activate((0, 1)).unwrap();

    assert_eq!(game.score(), 13);
    let events = game.take_events();
    assert!(events.contains(&GameEvent::Score(13)));
    assert!(events.contains(&GameEvent::GameOver));
}

#[test]
fn test_lucky7_explodes_only_past_the_lucky_value() {
    // Formation: three 6s make a 7; no explosion.
    let mut game = Game::lucky7(Lucky7Options {
        rows: 1,
        columns: 3,
        animation: false,
        seed: 13,
        ..Lucky7Options::default()
    });
    game.load_grid(&[vec![(6, 6), (6, 6), (6, 6)]]).unwrap();
    game.activate((0, 1)).unwrap();
    assert!(game
        .board()
        .grid()
        .iter()
        .any(|(_, cell)| cell.as_ref().is_some_and(|t| t.value() == 7)));

    // Joining already-lucky tiles exceeds the threshold and explodes,
    // banking the exploded tile's value on top of the join score.
    let mut game = Game::lucky7(Lucky7Options {
        rows: 1,
        columns: 3,
        animation: false,
        seed: 13,
        ..Lucky7Options::default()
    });
    game.load_grid(&[vec![(7, 7), (7, 7), (7, 7)]]).unwrap();
    game.activate((0, 1)).unwrap();
    assert_eq!(game.score(), 70 + 8);
    assert!(game
        .board()
        .grid()
        .iter()
        .all(|(_, cell)| cell.as_ref().is_some_and(|t| t.value() < 7)));
}

#[test]
fn test_unlimited_never_explodes() {
    let mut game = Game::unlimited(UnlimitedOptions {
        rows: 1,
        columns: 3,
        animation: false,
        seed: 23,
        ..UnlimitedOptions::default()
    });
    // Values far beyond the regular cap still behave like plain tiles.
    game.load_grid(&[vec![(1, 200), (1, 200), (1, 200)]]).unwrap();
    assert_eq!(game.score(), 200);

    game.activate((0, 0)).unwrap();

    assert_eq!(game.score(), 600);
    assert!(game
        .board()
        .grid()
        .iter()
        .any(|(_, cell)| cell.as_ref().is_some_and(|t| t.value() == 600)));
}

#[test]
fn test_reset_is_shape_idempotent() {
    let mut game = Game::make13(Make13Options {
        animation: false,
        seed: 41,
        ..Make13Options::default()
    });
    game.reset();
    let size = game.board().size();
    let score_range = 1..=Make13Options::default().initial_tiles;
    assert!(score_range.contains(&game.score()));

    game.reset();
    assert_eq!(game.board().size(), size);
    assert!(score_range.contains(&game.score()));
    assert!(!game.is_resolving());
    assert!(game.board().grid().iter().all(|(_, cell)| cell.is_some()));
}

#[test]
fn test_serialize_round_trips_through_mode_constructor() {
    let game = Game::lucky7(Lucky7Options {
        seed: 67,
        ..Lucky7Options::default()
    });
    let data = game.serialize();

    let mut restored = Game::lucky7(Lucky7Options {
        seed: 68,
        ..Lucky7Options::default()
    });
    restored.load_grid(&data).unwrap();
    assert_eq!(restored.serialize(), data);
}

#[test]
fn test_final_board_lands_in_the_high_score_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscores.json");

    let mut game = regular_1x3();
    game.load_grid(&[vec![(1, 1), (1, 1), (1, 1)]]).unwrap();
    game.activate((0, 1)).unwrap();

    let mut store = HighScoreStore::open(&path, game.mode().name()).unwrap();
    store.record(game.score(), game.serialize(), "ada").unwrap();

    let store = HighScoreStore::open(&path, "regular").unwrap();
    assert_eq!(store.scores(), vec![3]);
    assert_eq!(store.records()[0].grid, game.serialize());
}
