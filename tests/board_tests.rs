//! Board-level integration tests: connectivity and gravity through the
//! public API.

use std::collections::BTreeSet;

use tilefall::core::{
    Board, Game, RegularOptions, Tile, TileFactory, WeightedGenerator, WeightedSelector,
};
use tilefall::types::{Position, TileKind};

fn bare_board(rows: usize, columns: usize) -> Board {
    let selector = WeightedSelector::new([(TileKind::Basic(1), 1.0)], 21);
    let generator = WeightedGenerator::new(
        selector,
        TileFactory::Regular {
            max_value: Some(50),
        },
    );
    Board::new(rows, columns, generator)
}

fn basic(kind: u32) -> Tile {
    Tile::regular(TileKind::Basic(kind), 1, Some(50))
}

#[test]
fn test_partition_property_on_a_real_board() {
    let game = Game::regular(RegularOptions {
        seed: 1234,
        ..RegularOptions::default()
    });
    let components = game.board().find_all_connected();

    let mut seen: BTreeSet<Position> = BTreeSet::new();
    for component in &components {
        assert!(!component.is_empty());
        for &position in component {
            assert!(seen.insert(position), "{position:?} in two components");
        }
    }
    let (rows, columns) = game.board().size();
    assert_eq!(seen.len(), rows * columns);
}

#[test]
fn test_components_are_homogeneous() {
    let game = Game::regular(RegularOptions {
        seed: 77,
        ..RegularOptions::default()
    });
    for component in game.board().find_all_connected() {
        let mut kinds = component
            .iter()
            .filter_map(|&position| game.board().tile(position))
            .map(Tile::kind);
        if let Some(first) = kinds.next() {
            assert!(kinds.all(|kind| kind == first));
        }
    }
}

#[test]
fn test_find_connected_always_contains_root() {
    let game = Game::regular(RegularOptions {
        seed: 5,
        ..RegularOptions::default()
    });
    for position in game.board().grid().positions() {
        let component = game.board().find_connected(position, None);
        assert!(component.contains(&position));
    }
}

#[test]
fn test_fill_leaves_no_empties() {
    let mut board = bare_board(5, 7);
    board.fill();
    assert!(board.grid().iter().all(|(_, cell)| cell.is_some()));
}

#[test]
fn test_gravity_never_moves_a_disabled_tile() {
    // Tall column with a disabled tile in the middle and holes on both
    // sides of it.
    let mut board = bare_board(6, 1);
    board.place((0, 0), basic(2)).unwrap();
    let mut barrier = basic(9);
    barrier.disable();
    board.place((3, 0), barrier).unwrap();
    board.place((4, 0), basic(3)).unwrap();

    let plan = board.plan_drops();
    for frame in 0..Board::drop_frames(&plan) {
        board.apply_drop_frame(&plan, frame, None);
    }

    // The barrier did not move.
    let barrier_tile = board.tile((3, 0)).unwrap();
    assert!(barrier_tile.disabled());
    assert_eq!(barrier_tile.kind(), TileKind::Basic(9));

    // The tile above the barrier slid down to rest on it, never past it.
    assert_eq!(board.tile((2, 0)).unwrap().kind(), TileKind::Basic(2));

    // The tile below the barrier fell to the bottom and stayed below.
    assert_eq!(board.tile((5, 0)).unwrap().kind(), TileKind::Basic(3));

    assert!(board.grid().iter().all(|(_, cell)| cell.is_some()));
}

#[test]
fn test_gravity_watch_tracks_a_falling_tile() {
    let mut board = bare_board(4, 2);
    // Column 0: one tile at the top, three empties below it.
    board.place((0, 0), basic(2)).unwrap();
    // Column 1: full.
    for row in 0..4 {
        board.place((row, 1), basic(3)).unwrap();
    }

    let plan = board.plan_drops();
    let mut watch = Some((0usize, 0usize));
    for frame in 0..Board::drop_frames(&plan) {
        watch = board.apply_drop_frame(&plan, frame, watch);
    }

    assert_eq!(watch, Some((3, 0)));
    assert_eq!(board.tile((3, 0)).unwrap().kind(), TileKind::Basic(2));
}

#[test]
fn test_refills_are_drawn_per_frame() {
    // The generator only produces kind 1, the prefill is kind 2, so every
    // refill is identifiable; their count must equal the holes punched.
    let mut board = bare_board(5, 3);
    for position in board.grid().positions().collect::<Vec<_>>() {
        board.place(position, basic(2)).unwrap();
    }

    let holes = [(4usize, 0usize), (3, 0), (2, 1), (0, 2), (4, 2)];
    for &hole in &holes {
        board.take_tile(hole);
    }

    let plan = board.plan_drops();
    for frame in 0..Board::drop_frames(&plan) {
        board.apply_drop_frame(&plan, frame, None);
    }

    let fresh = board
        .grid()
        .iter()
        .filter(|(_, cell)| matches!(cell, Some(tile) if tile.kind() == TileKind::Basic(1)))
        .count();
    assert_eq!(fresh, holes.len());
    assert!(board.grid().iter().all(|(_, cell)| cell.is_some()));
}

#[test]
fn test_selector_degenerate_weights() {
    let mut selector =
        WeightedSelector::new([(TileKind::Basic(1), 1.0), (TileKind::Basic(2), 0.0)], 19);
    for _ in 0..200 {
        assert_eq!(selector.choose(), TileKind::Basic(1));
    }
}
