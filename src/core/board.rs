//! Board module - tile ownership, connectivity search, gravity resolution
//!
//! The board owns a grid of tiles and the generator that refills it. No other
//! component mutates cells directly; everything goes through board operations
//! (fill, removal, gravity frames, explosion).

use std::collections::{BTreeSet, HashSet};

use crate::core::generator::{TileGenerator, WeightedGenerator};
use crate::core::grid::Grid;
use crate::core::selector::WeightedSelector;
use crate::core::tile::Tile;
use crate::types::{GameError, Position, TileKind, AXIAL_DELTAS, RADIAL_DELTAS};

/// Edge relation for the connectivity search. The first argument is always
/// the tile at the flood-fill root.
pub type ConnectedFn = fn(&Tile, &Tile) -> bool;

fn tiles_match(root: &Tile, neighbour: &Tile) -> bool {
    root.matches(neighbour)
}

/// One column's pending drop work: the contiguous affected rows from the
/// lowest empty cell up to the blocking boundary (bottom to top), and how
/// many empty cells the run has to fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropRun {
    pub column: usize,
    /// Affected rows in descending order; the last entry is the topmost
    /// affected row, where refill tiles appear.
    pub rows: Vec<usize>,
    pub empties: usize,
}

/// Playing board: a grid of tiles plus the generator refilling it.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid<Tile>,
    generator: WeightedGenerator,
    connected: ConnectedFn,
}

impl Board {
    pub fn new(rows: usize, columns: usize, generator: WeightedGenerator) -> Self {
        Self {
            grid: Grid::new(rows, columns),
            generator,
            connected: tiles_match,
        }
    }

    /// Replace the connectivity relation. The default relation is tile
    /// equivalence ([`Tile::matches`]).
    pub fn with_connected(mut self, connected: ConnectedFn) -> Self {
        self.connected = connected;
        self
    }

    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    pub fn size(&self) -> (usize, usize) {
        self.grid.size()
    }

    pub fn generator(&self) -> &WeightedGenerator {
        &self.generator
    }

    pub fn selector_mut(&mut self) -> &mut WeightedSelector<TileKind> {
        self.generator.selector_mut()
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.grid.get(position)
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.grid.get_mut(position)
    }

    /// Remove and return the tile at `position`, leaving the cell empty.
    pub fn take_tile(&mut self, position: Position) -> Option<Tile> {
        self.grid.take(position)
    }

    /// Put a tile into a cell directly; used by deserialization and tests.
    pub fn place(&mut self, position: Position, tile: Tile) -> Result<(), GameError> {
        self.grid.set(position, tile).map(|_| ())
    }

    /// Empty every cell.
    pub fn reset(&mut self) {
        self.grid.reset();
    }

    /// Generate a tile for every empty cell. Initial population only; mid
    /// -resolution refills go through gravity frames instead.
    pub fn fill(&mut self) {
        let empties: Vec<Position> = self
            .grid
            .iter()
            .filter(|(_, cell)| cell.is_none())
            .map(|(position, _)| position)
            .collect();
        for position in empties {
            let tile = self.generator.generate(position);
            let _ = self.grid.set(position, tile);
        }
    }

    /// All positions connected to `root`, including `root` itself.
    ///
    /// Flood fill over axial adjacency: an edge exists between the root and
    /// a neighbour iff the board's relation holds between the tile at the
    /// root and the tile at the neighbour, so the root's tile is the
    /// comparison target throughout. When `candidates` is given, only those
    /// positions are explored (the root is always included).
    pub fn find_connected(
        &self,
        root: Position,
        candidates: Option<&HashSet<Position>>,
    ) -> BTreeSet<Position> {
        let mut visited = BTreeSet::new();
        let mut stack = vec![root];
        let root_tile = self.grid.get(root);

        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            let Some(root_tile) = root_tile else {
                // Empty root: nothing to compare against, singleton result.
                continue;
            };
            for neighbour in self.grid.adjacent(node, &AXIAL_DELTAS) {
                if let Some(candidates) = candidates {
                    if !candidates.contains(&neighbour) {
                        continue;
                    }
                }
                if visited.contains(&neighbour) {
                    continue;
                }
                let Some(tile) = self.grid.get(neighbour) else {
                    continue;
                };
                if (self.connected)(root_tile, tile) {
                    stack.push(neighbour);
                }
            }
        }

        visited
    }

    /// Partition the board into connectivity classes. Every position appears
    /// in exactly one returned component; empty and disabled cells come out
    /// as singletons.
    pub fn find_all_connected(&self) -> Vec<BTreeSet<Position>> {
        let mut remaining: HashSet<Position> = self.grid.positions().collect();
        let mut components = Vec::new();

        for position in self.grid.positions() {
            if !remaining.remove(&position) {
                continue;
            }
            let component = self.find_connected(position, Some(&remaining));
            for cell in &component {
                remaining.remove(cell);
            }
            components.push(component);
        }

        components
    }

    /// True iff a tile from above may fall through or into this cell.
    fn cell_movable(&self, position: Position) -> bool {
        match self.grid.cell(position) {
            None => false,
            Some(None) => true,
            Some(Some(tile)) => !tile.disabled(),
        }
    }

    /// Work out the per-column drop runs needed to refill empty cells.
    ///
    /// Each column is scanned bottom to top, counting a run of pending
    /// empties. A run ends (and is recorded) at the cell whose upward
    /// neighbour is a disabled tile or the grid edge; disabled tiles are
    /// immovable barriers, so a column splits into independently resolved
    /// sub-runs and no tile ever crosses one.
    pub fn plan_drops(&self) -> Vec<DropRun> {
        let (rows, columns) = self.grid.size();
        let mut runs = Vec::new();

        for column in 0..columns {
            let mut empties = 0usize;
            let mut affected: Vec<usize> = Vec::new();

            for row in (0..rows).rev() {
                if self.grid.get((row, column)).is_none() {
                    empties += 1;
                }

                let above_blocked = row == 0 || !self.cell_movable((row - 1, column));
                if above_blocked {
                    if empties == 0 {
                        continue;
                    }
                    affected.push(row);
                    runs.push(DropRun {
                        column,
                        rows: std::mem::take(&mut affected),
                        empties,
                    });
                    empties = 0;
                } else if empties > 0 {
                    affected.push(row);
                }
            }
        }

        runs
    }

    /// Number of frames a drop plan takes to settle.
    pub fn drop_frames(plan: &[DropRun]) -> usize {
        plan.iter().map(|run| run.empties).max().unwrap_or(0)
    }

    /// Apply one gravity frame of a drop plan.
    ///
    /// Every run that still has empties left at this frame slides each tile
    /// sitting above an empty slot down one cell, then generates exactly one
    /// new tile at the run's topmost affected row. One generator draw per
    /// run per frame, so refill tiles are drawn independently, never
    /// batched.
    ///
    /// A watched position is carried through any shift it takes part in and
    /// returned, giving the caller a stable handle on a moving tile.
    pub fn apply_drop_frame(
        &mut self,
        plan: &[DropRun],
        frame: usize,
        watch: Option<Position>,
    ) -> Option<Position> {
        let mut watch = watch;

        for run in plan {
            if frame >= run.empties {
                continue;
            }
            for j in 0..run.rows.len().saturating_sub(1) {
                let row = run.rows[j];
                let position = (row, run.column);
                let above = (row - 1, run.column);
                if self.grid.get(position).is_none() && self.grid.get(above).is_some() {
                    if let Some(tile) = self.grid.take(above) {
                        let _ = self.grid.set(position, tile);
                        if watch == Some(above) {
                            watch = Some(position);
                        }
                    }
                }
            }
            let Some(&top_row) = run.rows.last() else {
                continue;
            };
            let top = (top_row, run.column);
            let tile = self.generator.generate(top);
            let _ = self.grid.set(top, tile);
        }

        watch
    }

    /// Remove the tile at `center` and every non-disabled tile in its
    /// eight-cell surroundings. Returns the removed center tile's value.
    pub fn remove_explosion(&mut self, center: Position) -> u32 {
        let value = self.grid.get(center).map(Tile::value).unwrap_or(0);
        let neighbours = self.grid.adjacent(center, &RADIAL_DELTAS);
        let _ = self.grid.clear(center);
        for cell in neighbours {
            let removable = self
                .grid
                .get(cell)
                .map_or(true, |tile| !tile.disabled());
            if removable {
                let _ = self.grid.clear(cell);
            }
        }
        value
    }

    /// Serialize to rows of `(kind code, value)` pairs, top row first.
    /// Only meaningful for a resolved (fully populated) board.
    pub fn serialize(&self) -> Vec<Vec<(u32, u32)>> {
        (0..self.grid.rows())
            .map(|row| {
                self.grid
                    .row(row)
                    .iter()
                    .map(|cell| match cell {
                        Some(tile) => (tile.kind().code(), tile.value()),
                        None => (0, 0),
                    })
                    .collect()
            })
            .collect()
    }
}
