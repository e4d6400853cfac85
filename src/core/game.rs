//! Game module - the activation state machine
//!
//! The engine owns a board and orchestrates activations: collect a group,
//! join it into the activated tile, apply the mode's scoring and unlock
//! policies, remove the rest, and resolve gravity frame by frame. A
//! resolution is a sequence of discrete steps pulled one at a time by the
//! caller; while one is in flight the engine rejects new activations.

use std::collections::{BTreeSet, VecDeque};

use crate::core::board::{Board, DropRun};
use crate::core::generator::WeightedGenerator;
use crate::core::modes::{
    level_weight, GameMode, Lucky7Options, Make13Options, RegularOptions, UnlimitedOptions,
};
use crate::core::selector::WeightedSelector;
use crate::core::tile::Tile;
use crate::types::{
    GameError, GameEvent, Position, ResolveStep, TileKind, DEFAULT_NORMAL_WEIGHT,
};

/// In-flight resolution state.
#[derive(Debug, Clone)]
struct Resolution {
    plan: Vec<DropRun>,
    frame: usize,
    frames: usize,
    /// Board position of the joined tile, carried through gravity shifts.
    /// `None` for removals and after the combo check has run.
    watch: Option<Position>,
    combo_checked: bool,
}

/// A single game: board, mode policy, score, and resolution state.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    mode: GameMode,
    min_group: usize,
    score: u32,
    animation: bool,
    resolution: Option<Resolution>,
    events: VecDeque<GameEvent>,
}

impl Game {
    /// Start a regular game: join groups until max tiles form, join max
    /// tiles to blow up their surroundings.
    pub fn regular(options: RegularOptions) -> Self {
        let mode = GameMode::Regular {
            types: options.types,
            max_value: options.max_value,
            normal_weight: options.normal_weight,
            max_weight: options.max_weight,
            max_unlocked: false,
        };
        Self::with_mode(
            mode,
            options.rows,
            options.columns,
            options.min_group,
            options.animation,
            options.seed,
        )
    }

    /// Start a make-13 game: pairs merge into the next value up; reaching
    /// the goal value ends the game.
    pub fn make13(options: Make13Options) -> Self {
        let mode = GameMode::Make13 {
            initial_tiles: options.initial_tiles,
            goal_value: options.goal_value,
        };
        Self::with_mode(
            mode,
            options.rows,
            options.columns,
            options.min_group,
            options.animation,
            options.seed,
        )
    }

    /// Start a lucky-7 game: level merging where freshly exceeded lucky
    /// tiles explode.
    pub fn lucky7(options: Lucky7Options) -> Self {
        let mode = GameMode::Lucky7 {
            initial_tiles: options.initial_tiles,
            lucky_value: options.lucky_value,
        };
        Self::with_mode(
            mode,
            options.rows,
            options.columns,
            options.min_group,
            options.animation,
            options.seed,
        )
    }

    /// Start an unlimited game: regular merging with no value cap, chasing
    /// the largest tile.
    pub fn unlimited(options: UnlimitedOptions) -> Self {
        let mode = GameMode::Unlimited {
            types: options.types,
            normal_weight: DEFAULT_NORMAL_WEIGHT,
        };
        Self::with_mode(
            mode,
            options.rows,
            options.columns,
            options.min_group,
            options.animation,
            options.seed,
        )
    }

    fn with_mode(
        mode: GameMode,
        rows: usize,
        columns: usize,
        min_group: usize,
        animation: bool,
        seed: u64,
    ) -> Self {
        let selector = WeightedSelector::new(mode.initial_weights(), seed);
        let generator = WeightedGenerator::new(selector, mode.factory());
        let mut board = Board::new(rows, columns, generator);
        board.fill();

        let mut game = Self {
            board,
            mode,
            min_group,
            score: 0,
            animation,
            resolution: None,
            events: VecDeque::new(),
        };
        game.score = game.default_score();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> &GameMode {
        &self.mode
    }

    pub fn min_group(&self) -> usize {
        self.min_group
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_resolving(&self) -> bool {
        self.resolution.is_some()
    }

    pub fn animation(&self) -> bool {
        self.animation
    }

    pub fn set_animation(&mut self, animation: bool) {
        self.animation = animation;
    }

    /// Toggle animation; returns the new setting.
    pub fn toggle_animation(&mut self) -> bool {
        self.animation = !self.animation;
        self.animation
    }

    /// Drain all pending notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// All qualifying groups (size >= min_group) on the board.
    pub fn find_groups(&self) -> Vec<BTreeSet<Position>> {
        self.board
            .find_all_connected()
            .into_iter()
            .filter(|group| group.len() >= self.min_group)
            .collect()
    }

    /// The qualifying group containing `position`, if any.
    pub fn find_group(&self, position: Position) -> Option<BTreeSet<Position>> {
        let group = self.board.find_connected(position, None);
        (group.len() >= self.min_group).then_some(group)
    }

    /// True iff `position` could be activated right now.
    pub fn can_activate(&self, position: Position) -> bool {
        self.attempt_activate_collect(position).is_ok()
    }

    fn attempt_activate_collect(
        &self,
        position: Position,
    ) -> Result<BTreeSet<Position>, GameError> {
        if self.is_resolving() {
            return Err(GameError::Resolving);
        }
        if !self.board.grid().contains(position) {
            return Err(GameError::InvalidPosition(position));
        }
        let connected = self.board.find_connected(position, None);
        if connected.len() < self.min_group {
            return Err(GameError::InvalidActivation(position));
        }
        Ok(connected)
    }

    /// Activate the tile at `position`: join its group into it, score it,
    /// and start resolving. Fails without touching any state if the group
    /// is too small, the position is out of bounds, or a resolution is in
    /// flight.
    ///
    /// With animation enabled, the caller drives the resolution with
    /// [`Game::step`]; otherwise it completes before this returns.
    pub fn activate(&mut self, position: Position) -> Result<(), GameError> {
        let connected = self.attempt_activate_collect(position)?;

        let mut removed = Vec::with_capacity(connected.len() - 1);
        for &cell in connected.iter() {
            if cell == position {
                continue;
            }
            if let Some(tile) = self.board.take_tile(cell) {
                removed.push(tile);
            }
        }

        if let Some(current) = self.board.tile_mut(position) {
            current.join(removed.iter());
        }
        let current = match self.board.tile(position) {
            Some(tile) => tile.clone(),
            None => return Err(GameError::InvalidActivation(position)),
        };

        self.apply_activation_score(&current, &removed);
        self.check_unlock(&current);
        self.begin_resolution(Some(position));
        Ok(())
    }

    /// Remove the tiles at the given positions and resolve the holes. Same
    /// step discipline as [`Game::activate`], without joining or scoring.
    pub fn remove(&mut self, positions: &[Position]) -> Result<(), GameError> {
        if self.is_resolving() {
            return Err(GameError::Resolving);
        }
        for &position in positions {
            if !self.board.grid().contains(position) {
                return Err(GameError::InvalidPosition(position));
            }
        }

        for &position in positions {
            let _ = self.board.take_tile(position);
        }
        self.begin_resolution(None);
        Ok(())
    }

    fn begin_resolution(&mut self, watch: Option<Position>) {
        let plan = self.board.plan_drops();
        let frames = Board::drop_frames(&plan);
        self.resolution = Some(Resolution {
            plan,
            frame: 0,
            frames,
            watch,
            combo_checked: false,
        });

        if !self.animation {
            // Collapse every frame into one synchronous pass.
            while !matches!(self.step(), Some(ResolveStep::Done) | None) {}
        }
    }

    /// Advance the in-flight resolution by one step. Returns `None` when
    /// the engine is idle.
    ///
    /// Steps come out strictly in order: one `Drop` per gravity frame, an
    /// `Explode` if the joined tile ended up combo-maxed (followed by that
    /// explosion's own `Drop` frames), then a terminal `Done` that emits
    /// the resolved notification and, if no further move exists, game over.
    pub fn step(&mut self) -> Option<ResolveStep> {
        let mut resolution = self.resolution.take()?;

        if resolution.frame < resolution.frames {
            resolution.watch =
                self.board
                    .apply_drop_frame(&resolution.plan, resolution.frame, resolution.watch);
            resolution.frame += 1;
            self.resolution = Some(resolution);
            return Some(ResolveStep::Drop);
        }

        if !resolution.combo_checked {
            resolution.combo_checked = true;
            if let Some(position) = resolution.watch.take() {
                let combo = self
                    .board
                    .tile(position)
                    .is_some_and(Tile::is_combo_max);
                if combo {
                    let value = self.board.remove_explosion(position);
                    let score = self.score + value;
                    self.set_score(score);

                    resolution.plan = self.board.plan_drops();
                    resolution.frames = Board::drop_frames(&resolution.plan);
                    resolution.frame = 0;
                    self.resolution = Some(resolution);
                    return Some(ResolveStep::Explode);
                }
            }
        }

        // Terminal step: back to idle, then report.
        self.events.push_back(GameEvent::Resolved);
        if self.game_over() {
            self.events.push_back(GameEvent::GameOver);
        }
        Some(ResolveStep::Done)
    }

    /// True iff no qualifying group exists anywhere on the board.
    pub fn game_over(&self) -> bool {
        self.board
            .find_all_connected()
            .iter()
            .all(|group| group.len() < self.min_group)
    }

    /// Clear and refill the board, restore the mode's locked weight table,
    /// and reset the score to the mode default.
    pub fn reset(&mut self) {
        self.resolution = None;
        self.board.reset();

        if let GameMode::Regular { max_unlocked, .. } = &mut self.mode {
            *max_unlocked = false;
        }
        let weights = self.mode.initial_weights();
        self.board.selector_mut().update(weights, true);

        self.board.fill();
        let score = self.default_score();
        self.set_score(score);
    }

    fn default_score(&self) -> u32 {
        match self.mode {
            GameMode::Regular { .. } | GameMode::Lucky7 { .. } => 0,
            GameMode::Make13 { .. } | GameMode::Unlimited { .. } => self
                .board
                .grid()
                .iter()
                .filter_map(|(_, cell)| cell.as_ref().map(Tile::value))
                .max()
                .unwrap_or(0),
        }
    }

    fn set_score(&mut self, score: u32) {
        self.score = score;
        self.events.push_back(GameEvent::Score(score));
    }

    fn apply_activation_score(&mut self, current: &Tile, removed: &[Tile]) {
        match self.mode {
            GameMode::Regular { .. } => {
                let factor = if current.is_combo_max() { 50 } else { 1 };
                let points = (removed.len() as u32 + 1) * factor;
                let score = self.score + points;
                self.set_score(score);
            }
            GameMode::Make13 { goal_value, .. } => {
                let value = current.value();
                if value > self.score {
                    // A new personal best also unlocks that value in the
                    // generator weights.
                    self.board
                        .selector_mut()
                        .set(TileKind::Basic(value), level_weight(goal_value, value));
                    self.set_score(value);
                }
                if value == goal_value {
                    self.events.push_back(GameEvent::GameOver);
                }
            }
            GameMode::Lucky7 { lucky_value, .. } => {
                let value = current.value();
                let points = if value == 1 {
                    5
                } else if value == lucky_value {
                    (value - 2) * 20
                } else {
                    (value - 1) * 10
                };
                let score = self.score + points;
                self.set_score(score);
            }
            GameMode::Unlimited { .. } => {
                if current.value() > self.score {
                    self.set_score(current.value());
                }
            }
        }
    }

    /// Regular mode adds the max kind to the generator weights the first
    /// time a max tile is produced. Other modes never unlock it.
    fn check_unlock(&mut self, current: &Tile) {
        let weight = {
            let GameMode::Regular {
                max_weight,
                max_unlocked,
                ..
            } = &mut self.mode
            else {
                return;
            };
            if *max_unlocked || !current.is_max() {
                return;
            }
            *max_unlocked = true;
            *max_weight
        };
        self.board.selector_mut().set(TileKind::Max, weight);
    }

    /// Serialize the board to rows of `(kind code, value)` pairs.
    pub fn serialize(&self) -> Vec<Vec<(u32, u32)>> {
        self.board.serialize()
    }

    /// Rebuild the board from serialized rows, reconstructing each tile
    /// through this mode's factory. The default score is recomputed from
    /// the loaded tiles.
    pub fn load_grid(&mut self, data: &[Vec<(u32, u32)>]) -> Result<(), GameError> {
        let factory = self.board.generator().factory();
        for (row, row_data) in data.iter().enumerate() {
            for (column, &(code, value)) in row_data.iter().enumerate() {
                let tile = factory.restore(TileKind::from_code(code), value);
                self.board.place((row, column), tile)?;
            }
        }
        self.score = self.default_score();
        Ok(())
    }
}
