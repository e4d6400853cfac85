//! Tile module - tile values and their variant behavior
//!
//! A tile is a kind tag, a numeric value, and a disabled flag. How a tile
//! absorbs others (`join`), when it counts as maxed, and when it explodes is
//! decided by a closed set of behavior variants dispatched by pattern match.

use crate::types::{Position, TileKind};

/// Variant-specific join/maximize rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileBehavior {
    /// Values add up on join; the tile saturates into the `Max` kind once
    /// its value reaches `max_value`. `None` means the value grows without
    /// bound and the tile never maximizes.
    Regular { max_value: Option<u32> },
    /// Value (and kind) advance by exactly one per join, however many tiles
    /// were absorbed.
    Level,
    /// Level behavior that turns explosive around `lucky_value`.
    Lucky { lucky_value: u32 },
}

/// A single board tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    kind: TileKind,
    value: u32,
    disabled: bool,
    behavior: TileBehavior,
}

impl Tile {
    /// Create a regular tile. A tile constructed with the `Max` kind below
    /// the cap is immediately brought up to the cap.
    pub fn regular(kind: TileKind, value: u32, max_value: Option<u32>) -> Self {
        let mut tile = Self {
            kind,
            value,
            disabled: false,
            behavior: TileBehavior::Regular { max_value },
        };
        if let Some(max) = max_value {
            if kind == TileKind::Max && value < max {
                tile.maximize();
            }
        }
        tile
    }

    /// Create a level tile; its kind tracks its value.
    pub fn level(value: u32) -> Self {
        Self {
            kind: TileKind::Basic(value),
            value,
            disabled: false,
            behavior: TileBehavior::Level,
        }
    }

    /// Create a lucky tile; level behavior with an explosion threshold.
    pub fn lucky(value: u32, lucky_value: u32) -> Self {
        Self {
            kind: TileKind::Basic(value),
            value,
            disabled: false,
            behavior: TileBehavior::Lucky { lucky_value },
        }
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn behavior(&self) -> TileBehavior {
        self.behavior
    }

    /// The value to render, or `None` when the tile hides its initial pip.
    pub fn display_value(&self) -> Option<u32> {
        match self.behavior {
            TileBehavior::Regular { .. } if self.value == 1 => None,
            _ => Some(self.value),
        }
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// Disable this tile. One-way: a disabled tile never moves, never
    /// matches, and is never removed by gravity or explosions.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    /// Absorb the listed tiles into this one. The listed tiles themselves
    /// are untouched; the caller is responsible for removing them from the
    /// board.
    pub fn join<'a, I>(&mut self, others: I)
    where
        I: IntoIterator<Item = &'a Tile>,
    {
        match self.behavior {
            TileBehavior::Regular { max_value } => {
                for other in others {
                    self.value = self.value.saturating_add(other.value());
                }
                if let Some(max) = max_value {
                    if self.kind != TileKind::Max && self.value >= max {
                        self.maximize();
                    }
                }
            }
            TileBehavior::Level | TileBehavior::Lucky { .. } => {
                // One step per join, regardless of how many tiles merged in.
                let _ = others;
                self.value += 1;
                self.kind = TileKind::Basic(self.value);
            }
        }
    }

    /// Force this tile into the maxed state. Only meaningful for capped
    /// regular tiles; otherwise a no-op.
    pub fn maximize(&mut self) {
        if let TileBehavior::Regular {
            max_value: Some(max),
        } = self.behavior
        {
            self.kind = TileKind::Max;
            self.value = max;
        }
    }

    pub fn is_max(&self) -> bool {
        match self.behavior {
            TileBehavior::Regular { .. } => self.kind == TileKind::Max,
            TileBehavior::Level => false,
            TileBehavior::Lucky { lucky_value } => self.value >= lucky_value,
        }
    }

    /// True iff this tile was maxed by joining tiles that were already at
    /// the cap, which is what arms the explosion.
    pub fn is_combo_max(&self) -> bool {
        match self.behavior {
            TileBehavior::Regular { max_value } => {
                self.is_max() && max_value.is_some_and(|max| self.value > max)
            }
            TileBehavior::Level => false,
            TileBehavior::Lucky { lucky_value } => self.value > lucky_value,
        }
    }

    /// Connectivity equivalence. Regular tiles match on kind; level and
    /// lucky tiles match on value. Disabled tiles match nothing.
    pub fn matches(&self, other: &Tile) -> bool {
        if self.disabled || other.disabled {
            return false;
        }
        match self.behavior {
            TileBehavior::Regular { .. } => self.kind == other.kind(),
            TileBehavior::Level | TileBehavior::Lucky { .. } => self.value == other.value(),
        }
    }
}

/// The construction function a game mode binds: how a drawn kind (or a
/// serialized `(kind, value)` pair) becomes a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileFactory {
    Regular { max_value: Option<u32> },
    Level,
    Lucky { lucky_value: u32 },
}

impl TileFactory {
    /// Build a fresh tile for a drawn kind. The position is accepted for
    /// interface uniformity; the default factories ignore it.
    pub fn build(&self, kind: TileKind, _position: Position) -> Tile {
        match *self {
            TileFactory::Regular { max_value } => Tile::regular(kind, 1, max_value),
            TileFactory::Level => Tile::level(kind.code()),
            TileFactory::Lucky { lucky_value } => Tile::lucky(kind.code(), lucky_value),
        }
    }

    /// Rebuild a tile from its serialized `(kind, value)` pair.
    pub fn restore(&self, kind: TileKind, value: u32) -> Tile {
        match *self {
            TileFactory::Regular { max_value } => Tile::regular(kind, value, max_value),
            TileFactory::Level => Tile::level(value),
            TileFactory::Lucky { lucky_value } => Tile::lucky(value, lucky_value),
        }
    }
}
